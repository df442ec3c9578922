use serde::Deserialize;


/// Product codes written to table `[apyv_gr]`, field `[preke]`.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct GoodsConfiguration {
    /// Product code for the sold item itself.
    pub item: i64,

    /// Product code for shipping. `None` disables shipping lines.
    #[serde(default)]
    pub shipping: Option<i64>,

    /// Product code for tax lines. `None` disables them.
    #[serde(default)]
    pub tax: Option<i64>,

    /// Product code for gift wrapping. `None` disables it.
    #[serde(default)]
    pub gift: Option<i64>,
}
