use butent_config::{configuration::Configuration, logging::initialize_tracing_from_configuration};
use chrono::Utc;
use clap::Parser;
use miette::{Context, IntoDiagnostic, Result};
use tracing::{info, warn};

use crate::cli::{parse_str_as_date_time, CLIArgs, Command};

mod cli;


fn main() -> Result<()> {
    let cli_args = CLIArgs::parse();

    // Load configuration.
    let configuration = match cli_args.configuration_file_path.as_ref() {
        Some(path) => Configuration::load_from_path(path),
        None => Configuration::load_from_default_path(),
    }
    .wrap_err("Failed to load configuration file.")?;


    let logging_raii_guard = initialize_tracing_from_configuration(&configuration)
        .wrap_err("Failed to initialize tracing.")?;

    if let Some(file_path) = configuration.file_path.as_ref() {
        info!(path = %file_path.display(), "Configuration loaded.");
    }


    match cli_args.command {
        Command::Check => {
            let database = configuration.database();

            info!(
                service = %configuration.app.service_name,
                listen_address = %configuration.app.listen_address(),
                schedule = %configuration.app.schedule,
                tls = configuration.app.is_tls_enabled(),
                debug = configuration.debug(),
                "App settings are valid."
            );

            info!(
                dialect = %database.dialect.name(),
                host = %database.host,
                name = %database.name,
                time_zone = %database.time_zone(),
                max_open_connections = database.pool().max_open_connections,
                "Database settings are valid."
            );

            if database.format_dsn().is_empty() {
                warn!(
                    dialect = %database.dialect.name(),
                    "Database dialect is not supported, no connection string can be built."
                );
            }

            info!(
                warehouse = %configuration.butent.warehouse,
                user_id = configuration.butent.user_id,
                date_mode = ?configuration.butent.date,
                "Butent settings are valid."
            );
        }
        Command::Dsn => {
            println!("{}", configuration.database().format_dsn());
        }
        Command::Date { at } => {
            let time = match at.as_deref() {
                Some(at) => parse_str_as_date_time(at)?,
                None => Utc::now().fixed_offset(),
            };

            println!("{}", configuration.butent.resolve_date(time).to_rfc3339());
        }
        Command::Section { name } => {
            let section = configuration.load_section::<toml::Value>(&name)?;

            let rendered = match &section {
                toml::Value::Table(table) => toml::to_string_pretty(table).into_diagnostic()?,
                other => other.to_string(),
            };

            println!("{}", rendered.trim_end());
        }
    }


    drop(logging_raii_guard);
    Ok(())
}
