use std::{collections::HashMap, fmt, path::PathBuf};

use miette::{miette, Context, Result};
use serde::Deserialize;

use crate::configuration::{
    traits::ResolvableConfigurationWithContext,
    utilities::replace_placeholders_in_path,
};


/// Descriptors accepted in place of a six-field cron expression.
const PREDEFINED_SCHEDULES: [&str; 7] = [
    "@yearly",
    "@annually",
    "@monthly",
    "@weekly",
    "@daily",
    "@midnight",
    "@hourly",
];

const CRON_FIELD_NAMES: [&str; 6] = [
    "seconds",
    "minutes",
    "hours",
    "day of month",
    "month",
    "day of week",
];


#[derive(Deserialize, Clone, Debug)]
pub(super) struct UnresolvedSecureConfiguration {
    cache: String,

    cert: String,

    key: String,
}

#[derive(Deserialize, Clone, Debug)]
pub(super) struct UnresolvedAppConfiguration {
    #[serde(default)]
    service_name: String,

    #[serde(default)]
    service_display: String,

    #[serde(default)]
    verbose: bool,

    #[serde(default)]
    console: bool,

    #[serde(default)]
    host: String,

    #[serde(default)]
    port: u16,

    #[serde(default)]
    recover: bool,

    #[serde(default)]
    gzip: bool,

    #[serde(default)]
    auto_update: bool,

    #[serde(default)]
    secure: Option<UnresolvedSecureConfiguration>,

    schedule: String,

    #[serde(default, rename = "expose_error_stack")]
    expose_error_stack: bool,
}


/// TLS certificate locations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecureConfiguration {
    /// Directory for cached (e.g. automatically issued) certificates.
    pub cache: PathBuf,

    pub cert: PathBuf,

    pub key: PathBuf,
}


const DURATION_UNITS: [&str; 7] = ["ns", "us", "µs", "ms", "s", "m", "h"];


/// Whether `value` is a sequence of `<number><unit>` pairs, e.g. `1h30m` or `1.5s`.
fn is_duration(value: &str) -> bool {
    let mut rest = value;
    if rest.is_empty() {
        return false;
    }

    while !rest.is_empty() {
        let number_length = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let number = &rest[..number_length];

        if number.is_empty() || number.parse::<f64>().is_err() {
            return false;
        }
        rest = &rest[number_length..];

        // Longest unit first, so `ms` is not read as `m` followed by `s`.
        let unit = DURATION_UNITS
            .iter()
            .filter(|unit| rest.starts_with(*unit))
            .max_by_key(|unit| unit.len());

        match unit {
            Some(unit) => rest = &rest[unit.len()..],
            None => return false,
        }
    }

    true
}


/// A cron schedule (`seconds minutes hours day-of-month month day-of-week`)
/// or one of the predefined `@` descriptors.
///
/// Only the shape of the expression is checked here,
/// the scheduler that consumes it does the rest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schedule(String);

impl Schedule {
    pub fn parse(expression: &str) -> Result<Self> {
        let expression = expression.trim();

        if expression.is_empty() {
            return Err(miette!("Schedule is empty, a cron expression is required."));
        }

        if expression == "@every" {
            return Err(miette!("Schedule \"@every\" is missing its interval."));
        }

        if let Some(interval) = expression
            .strip_prefix("@every")
            .filter(|rest| rest.starts_with(char::is_whitespace))
        {
            let interval = interval.trim();
            if !is_duration(interval) {
                return Err(miette!(
                    "Schedule interval \"{}\" is not a duration (e.g. 90s, 15m, 1h30m).",
                    interval
                ));
            }

            return Ok(Self(format!("@every {}", interval)));
        }

        if expression.starts_with('@') {
            if !PREDEFINED_SCHEDULES.contains(&expression) {
                return Err(miette!(
                    "Unknown predefined schedule \"{}\", expected one of: {}.",
                    expression,
                    PREDEFINED_SCHEDULES.join(", ")
                ));
            }

            return Ok(Self(expression.to_string()));
        }


        let fields = expression.split_whitespace().collect::<Vec<_>>();
        if fields.len() != CRON_FIELD_NAMES.len() {
            return Err(miette!(
                "Schedule \"{}\" has {} fields, expected {} ({}).",
                expression,
                fields.len(),
                CRON_FIELD_NAMES.len(),
                CRON_FIELD_NAMES.join(", ")
            ));
        }

        for (field, field_name) in fields.iter().zip(CRON_FIELD_NAMES) {
            let is_valid = field
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '*' | '/' | ',' | '-' | '?'));

            if !is_valid {
                return Err(miette!(
                    "Schedule field \"{}\" ({}) contains unsupported characters.",
                    field,
                    field_name
                ));
            }
        }

        Ok(Self(fields.join(" ")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


/// Service-level settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfiguration {
    pub service_name: String,

    pub service_display: String,

    /// Debug mode.
    pub verbose: bool,

    /// Write logs to the console.
    pub console: bool,

    /// Host the API listens on.
    pub host: String,

    /// Port the API listens on.
    pub port: u16,

    /// Recover from panics in HTTP handlers.
    pub recover: bool,

    /// Gzip HTTP responses.
    pub gzip: bool,

    pub auto_update: bool,

    pub secure: Option<SecureConfiguration>,

    pub schedule: Schedule,

    /// Include internal stack traces in JSON error responses.
    pub expose_error_stack: bool,
}

impl ResolvableConfigurationWithContext for UnresolvedAppConfiguration {
    type Resolved = AppConfiguration;
    type Context = HashMap<&'static str, String>;

    fn resolve(self, context: Self::Context) -> Result<Self::Resolved> {
        let schedule = Schedule::parse(&self.schedule)
            .wrap_err_with(|| miette!("Failed to parse field schedule"))?;

        let secure = self.secure.map(|secure| SecureConfiguration {
            cache: replace_placeholders_in_path(secure.cache, &context),
            cert: replace_placeholders_in_path(secure.cert, &context),
            key: replace_placeholders_in_path(secure.key, &context),
        });


        Ok(Self::Resolved {
            service_name: self.service_name,
            service_display: self.service_display,
            verbose: self.verbose,
            console: self.console,
            host: self.host,
            port: self.port,
            recover: self.recover,
            gzip: self.gzip,
            auto_update: self.auto_update,
            secure,
            schedule,
            expose_error_stack: self.expose_error_stack,
        })
    }
}

impl AppConfiguration {
    /// `host:port` the API should bind to.
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_tls_enabled(&self) -> bool {
        self.secure.is_some()
    }
}


#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::configuration::utilities::placeholders_for_file;

    #[test]
    fn accepts_six_field_expressions() {
        let schedule = Schedule::parse("0  */5 9-17 * JAN-DEC MON,WED,FRI").unwrap();

        assert_eq!(schedule.as_str(), "0 */5 9-17 * JAN-DEC MON,WED,FRI");
    }

    #[test]
    fn accepts_predefined_descriptors() {
        assert!(Schedule::parse("@daily").is_ok());
        assert!(Schedule::parse("@every 1h30m").is_ok());
        assert!(Schedule::parse("@fortnightly").is_err());
        assert!(Schedule::parse("@every").is_err());
        assert!(Schedule::parse("@everyday").is_err());
        assert!(Schedule::parse("@every banana").is_err());
        assert!(Schedule::parse("@every 15").is_err());
        assert!(Schedule::parse("@every 1.5s").is_ok());
        assert_eq!(
            Schedule::parse("@every   250ms").unwrap().as_str(),
            "@every 250ms"
        );
    }

    #[test]
    fn rejects_malformed_expressions() {
        assert!(Schedule::parse("").is_err());
        assert!(Schedule::parse("* * * * *").is_err());
        assert!(Schedule::parse("* * * * * * *").is_err());
        assert!(Schedule::parse("* * * * * %").is_err());
    }

    #[test]
    fn resolves_flags_and_tls_paths() {
        let unresolved = toml::from_str::<UnresolvedAppConfiguration>(
            r#"
            service_name = "butent-sync"
            host = "0.0.0.0"
            port = 8080
            gzip = true
            schedule = "0 0 * * * *"
            expose_error_stack = true

            [secure]
            cache = "{CONFIGURATION_DIRECTORY}/certs"
            cert = "/etc/ssl/cert.pem"
            key = "/etc/ssl/key.pem"
            "#,
        )
        .unwrap();

        let app = unresolved
            .resolve(placeholders_for_file(Some(Path::new("/srv/app/config.toml"))))
            .unwrap();

        assert_eq!(app.listen_address(), "0.0.0.0:8080");
        assert!(app.gzip);
        assert!(!app.recover);
        assert!(app.expose_error_stack);
        assert!(app.is_tls_enabled());
        assert_eq!(
            app.secure.unwrap().cache,
            PathBuf::from("/srv/app/certs")
        );
    }

    #[test]
    fn missing_schedule_is_an_error() {
        let result = toml::from_str::<UnresolvedAppConfiguration>("service_name = \"x\"");

        assert!(result.is_err());
    }
}
