//! Command-line interface definitions for the `butent-config` binary.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use clap::{Parser, Subcommand};
use miette::{miette, Context, IntoDiagnostic, Result};



/// Command-line arguments.
#[derive(Parser)]
#[command(
    name = "butent-config",
    author,
    about = "Validates a Butent service configuration file and prints values derived from it.",
    version
)]
pub struct CLIArgs {
    /// This is the path to the configuration file to use.
    /// If unspecified, this defaults to `./config.toml`.
    #[arg(
        short = 'c',
        long = "configuration-file-path",
        global = true,
        help = "Path to the configuration file to use. Defaults to ./config.toml"
    )]
    pub configuration_file_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load and validate the configuration, then log a short summary.
    Check,

    /// Print the database connection string.
    Dsn,

    /// Print the document date picked by the `butent.date` setting.
    Date {
        #[arg(
            long = "at",
            help = "Date to resolve, in RFC 3339 format (e.g. 2024-05-01T10:00:00+03:00). \
                    Defaults to the current time in UTC."
        )]
        at: Option<String>,
    },

    /// Print a section of the configuration file.
    Section {
        #[arg(help = "Section name, nested tables separated by dots (e.g. shop.mapping).")]
        name: String,
    },
}


/// Parse an RFC 3339 timestamp, keeping its UTC offset.
pub fn parse_str_as_date_time(value: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value)
        .into_diagnostic()
        .wrap_err_with(|| {
            miette!(
                "Failed to decode string as a date: expected RFC 3339 format, found {}.",
                value
            )
        })
}
