use miette::Diagnostic;
use thiserror::Error;


/// Errors returned when loading a custom (named) section out of an already-loaded configuration.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigurationError {
    #[error("configuration section \"{name}\" not found")]
    #[diagnostic(
        code(butent_config::section_not_found),
        help("add a [{name}] table to the configuration file")
    )]
    SectionNotFound { name: String },

    #[error("configuration section \"{name}\" could not be deserialized")]
    #[diagnostic(code(butent_config::invalid_section))]
    InvalidSection {
        name: String,
        #[source]
        source: toml::de::Error,
    },
}
