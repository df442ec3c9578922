use std::path::Path;

use miette::{miette, Context, IntoDiagnostic, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::configuration::Configuration;


const DEFAULT_LOG_FILE_NAME_PREFIX: &str = "butent-config.log";


/// Keeps the non-blocking log file writer alive. Logs still buffered
/// are flushed when this is dropped, so hold it until the program exits.
#[must_use = "dropping the guard stops file logging"]
pub struct TracingGuard {
    _log_file_guard: Option<WorkerGuard>,
}


/// Installs the global tracing subscriber.
///
/// Console output goes to stderr and is only enabled when a console filter is given.
/// File output rotates daily inside `log_file_output_directory`
/// (created if missing), and is disabled when no directory is given.
pub fn initialize_tracing(
    console_output_level_filter: Option<EnvFilter>,
    log_file_output_level_filter: EnvFilter,
    log_file_output_directory: Option<&Path>,
    log_file_name_prefix: &str,
) -> Result<TracingGuard> {
    let console_layer = console_output_level_filter.map(|level_filter| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(level_filter)
    });


    let (log_file_layer, log_file_guard) = match log_file_output_directory {
        Some(log_file_output_directory) => {
            std::fs::create_dir_all(log_file_output_directory)
                .into_diagnostic()
                .wrap_err_with(|| {
                    miette!(
                        "Failed to create log file directory at {}.",
                        log_file_output_directory.display()
                    )
                })?;

            let file_appender =
                tracing_appender::rolling::daily(log_file_output_directory, log_file_name_prefix);
            let (non_blocking_appender, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking_appender)
                .with_filter(log_file_output_level_filter);

            (Some(layer), Some(guard))
        }
        None => (None, None),
    };


    tracing_subscriber::registry()
        .with(console_layer)
        .with(log_file_layer)
        .try_init()
        .into_diagnostic()
        .wrap_err("Failed to install global tracing subscriber.")?;

    Ok(TracingGuard {
        _log_file_guard: log_file_guard,
    })
}

/// [`initialize_tracing`] driven by a loaded configuration: console output
/// follows `app.console`, file output and level filters follow the `[logging]` table.
pub fn initialize_tracing_from_configuration(configuration: &Configuration) -> Result<TracingGuard> {
    let log_file_name_prefix = if configuration.app.service_name.is_empty() {
        DEFAULT_LOG_FILE_NAME_PREFIX.to_string()
    } else {
        format!("{}.log", configuration.app.service_name)
    };

    let console_output_level_filter = configuration
        .app
        .console
        .then(|| configuration.logging.console_output_level_filter());

    initialize_tracing(
        console_output_level_filter,
        configuration.logging.log_file_output_level_filter(),
        configuration.logging.log_file_output_directory.as_deref(),
        &log_file_name_prefix,
    )
}
