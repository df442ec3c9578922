use miette::Result;

/// A raw (deserialized) configuration table that can be turned into
/// its validated form, with every default filled in.
pub trait ResolvableConfiguration {
    type Resolved;

    /// Consume the raw table and produce its `Resolved` counterpart.
    /// Returning `Err` marks the table as invalid; nothing is ever
    /// resolved partially.
    fn resolve(self) -> Result<Self::Resolved>;
}


/// Same as [`ResolvableConfiguration`], but for tables whose resolution
/// depends on something outside of the table itself (the location of the
/// configuration file, or values from a sibling table).
pub trait ResolvableConfigurationWithContext {
    type Context;
    type Resolved;

    /// Consume the raw table and produce its `Resolved` counterpart,
    /// using `context` where needed.
    fn resolve(self, context: Self::Context) -> Result<Self::Resolved>;
}
