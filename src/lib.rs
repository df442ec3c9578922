//! Configuration for the Butent integration services: service settings,
//! the database connection (with DSN formatting for MySQL and SQL Server)
//! and the Butent accounting settings.
//!
//! ```no_run
//! use butent_config::configuration::Configuration;
//!
//! # fn main() -> miette::Result<()> {
//! let configuration = Configuration::load_from_path("config.toml")?;
//! let dsn = configuration.database().format_dsn();
//! # let _ = dsn;
//! # Ok(())
//! # }
//! ```

pub mod configuration;
pub mod logging;
