use std::{collections::HashMap, fmt};

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use miette::Result;
use serde::Deserialize;
use tracing::debug;

use super::goods::GoodsConfiguration;
use crate::configuration::traits::ResolvableConfiguration;


/// VAT status code written to table `[apyv_gr]`, field `[pvm_stat]`.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct VatCode(pub String);

impl fmt::Display for VatCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


/// How [`ButentConfiguration::resolve_date`] picks document dates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateMode {
    /// Midnight of the current day.
    StartOfDay,
    /// 23:59:59 of the current day.
    EndOfDay,
    /// The current time, unchanged.
    Now,
}

impl DateMode {
    fn from_configuration_value(value: &str) -> Self {
        match value {
            "startday" => DateMode::StartOfDay,
            "endday" => DateMode::EndOfDay,
            other => {
                debug!(date = %other, "Unrecognized date mode, using the current time.");
                DateMode::Now
            }
        }
    }
}


/// Keys of the `operations` table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationZone {
    /// The country set in `home_country`.
    Home,
    /// Euro zone countries (table `[salys]` with mode `[e]`).
    Euro,
    /// Everything else.
    Other,
}

impl OperationZone {
    pub fn key(self) -> &'static str {
        match self {
            OperationZone::Home => "home",
            OperationZone::Euro => "euro",
            OperationZone::Other => "other",
        }
    }
}


#[derive(Deserialize, Clone, Debug)]
pub(super) struct UnresolvedButentConfiguration {
    #[serde(default)]
    letter: String,

    #[serde(default)]
    home_country: String,

    #[serde(default)]
    operations: HashMap<String, String>,

    #[serde(default)]
    warehouse: String,

    #[serde(default)]
    isaf: Option<i64>,

    #[serde(default)]
    date: Option<String>,

    #[serde(default)]
    client: Option<String>,

    goods: GoodsConfiguration,

    #[serde(default)]
    user_id: i64,

    #[serde(default)]
    vat: VatCode,
}


/// Settings for the Butent accounting database.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButentConfiguration {
    /// Table `[apyvarta]`, field `[raide]`.
    pub letter: String,

    /// Country code treated as the home country.
    pub home_country: String,

    /// Operation codes keyed by `home`, `euro` and `other`.
    pub operations: HashMap<String, String>,

    /// Table `[apyvarta]`, field `[tiek_sand]`.
    pub warehouse: String,

    /// Table `[apyvarta]`, field `[isaf]`. `None` when disabled.
    pub isaf: Option<i64>,

    pub date: Option<DateMode>,

    /// Table `[apyvarta]`, field `[gavejas]`.
    pub client: Option<String>,

    pub goods: GoodsConfiguration,

    /// Written to every `[inp_user]` field.
    pub user_id: i64,

    pub vat: VatCode,
}


impl ResolvableConfiguration for UnresolvedButentConfiguration {
    type Resolved = ButentConfiguration;

    fn resolve(self) -> Result<Self::Resolved> {
        for key in self.operations.keys() {
            if !matches!(key.as_str(), "home" | "euro" | "other") {
                debug!(operation = %key, "Ignoring unknown operation key.");
            }
        }

        Ok(ButentConfiguration {
            letter: self.letter,
            home_country: self.home_country,
            operations: self.operations,
            warehouse: self.warehouse,
            isaf: self.isaf.filter(|isaf| *isaf != 0),
            date: self
                .date
                .as_deref()
                .map(DateMode::from_configuration_value),
            client: self.client,
            goods: self.goods,
            user_id: self.user_id,
            vat: self.vat,
        })
    }
}


impl ButentConfiguration {
    pub fn good_item(&self) -> i64 {
        self.goods.item
    }

    pub fn shipping_item(&self) -> Option<i64> {
        self.goods.shipping
    }

    pub fn tax_item(&self) -> Option<i64> {
        self.goods.tax
    }

    pub fn gift_item(&self) -> Option<i64> {
        self.goods.gift
    }

    pub fn isaf(&self) -> Option<i64> {
        self.isaf
    }

    pub fn operation(&self, zone: OperationZone) -> Option<&str> {
        self.operations.get(zone.key()).map(String::as_str)
    }

    pub fn is_home_country(&self, country_code: &str) -> bool {
        !self.home_country.is_empty() && self.home_country.eq_ignore_ascii_case(country_code)
    }

    /// Returns the document date to use instead of `time`.
    ///
    /// Without a configured date mode `time` is returned as-is. Otherwise only
    /// the time zone of `time` is kept: the result is derived from the current
    /// wall-clock time in that zone.
    pub fn resolve_date<Z: TimeZone>(&self, time: DateTime<Z>) -> DateTime<Z> {
        self.resolve_date_at(time, Utc::now())
    }

    /// [`Self::resolve_date`] with an explicit "current time".
    pub fn resolve_date_at<Z: TimeZone>(&self, time: DateTime<Z>, now: DateTime<Utc>) -> DateTime<Z> {
        let Some(mode) = self.date else {
            return time;
        };

        let now = now.with_timezone(&time.timezone());

        let time_of_day = match mode {
            DateMode::StartOfDay => NaiveTime::from_hms_opt(0, 0, 0),
            DateMode::EndOfDay => NaiveTime::from_hms_opt(23, 59, 59),
            DateMode::Now => None,
        };

        match time_of_day {
            Some(time_of_day) => at_time_of_day(now, time_of_day),
            None => now,
        }
    }
}

/// Moves `now` to `time_of_day` on the same local date.
/// A local time skipped by a DST transition leaves `now` unchanged.
fn at_time_of_day<Z: TimeZone>(now: DateTime<Z>, time_of_day: NaiveTime) -> DateTime<Z> {
    let local = now.date_naive().and_time(time_of_day);

    match now.timezone().from_local_datetime(&local).earliest() {
        Some(moved) => moved,
        None => now,
    }
}
