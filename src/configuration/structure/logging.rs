use std::{collections::HashMap, path::PathBuf};

use miette::{miette, Context, IntoDiagnostic, Result};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::configuration::{
    traits::ResolvableConfigurationWithContext,
    utilities::replace_placeholders_in_path,
};


const VERBOSE_LEVEL_FILTER: &str = "debug";
const DEFAULT_LEVEL_FILTER: &str = "info";


#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub(super) struct UnresolvedLoggingConfiguration {
    console_output_level_filter: Option<String>,

    log_file_output_level_filter: Option<String>,

    log_file_output_directory: Option<String>,
}

/// What the `[logging]` table is resolved against.
pub(super) struct LoggingResolutionContext {
    /// `app.verbose`, which picks the default level filters.
    pub(super) verbose: bool,

    pub(super) placeholders: HashMap<&'static str, String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfiguration {
    pub console_output_level_filter: String,

    pub log_file_output_level_filter: String,

    /// No log file is written when this is `None`.
    pub log_file_output_directory: Option<PathBuf>,
}

impl ResolvableConfigurationWithContext for UnresolvedLoggingConfiguration {
    type Resolved = LoggingConfiguration;
    type Context = LoggingResolutionContext;

    fn resolve(self, context: Self::Context) -> Result<Self::Resolved> {
        let default_level_filter = if context.verbose {
            VERBOSE_LEVEL_FILTER
        } else {
            DEFAULT_LEVEL_FILTER
        };

        let console_output_level_filter = self
            .console_output_level_filter
            .unwrap_or_else(|| default_level_filter.to_string());

        let log_file_output_level_filter = self
            .log_file_output_level_filter
            .unwrap_or_else(|| default_level_filter.to_string());


        // Validate the file and console level filters.
        EnvFilter::try_new(&console_output_level_filter)
            .into_diagnostic()
            .wrap_err_with(|| miette!("Failed to parse field console_output_level_filter"))?;

        EnvFilter::try_new(&log_file_output_level_filter)
            .into_diagnostic()
            .wrap_err_with(|| miette!("Failed to parse field log_file_output_level_filter"))?;


        let log_file_output_directory = self
            .log_file_output_directory
            .filter(|directory| !directory.is_empty())
            .map(|directory| replace_placeholders_in_path(directory, &context.placeholders));


        Ok(Self::Resolved {
            console_output_level_filter,
            log_file_output_level_filter,
            log_file_output_directory,
        })
    }
}

impl LoggingConfiguration {
    pub fn console_output_level_filter(&self) -> EnvFilter {
        // Validated in `resolve`; the fallback is never reached.
        EnvFilter::try_new(&self.console_output_level_filter)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL_FILTER))
    }

    pub fn log_file_output_level_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.log_file_output_level_filter)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL_FILTER))
    }
}
