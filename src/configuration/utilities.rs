use std::{collections::HashMap, env::current_dir, path::Path, path::PathBuf};

use miette::{miette, Context, IntoDiagnostic, Result};


/// Name of the configuration file looked up when no explicit path is given.
pub const DEFAULT_CONFIGURATION_FILE_NAME: &str = "config.toml";

/// Placeholder that is replaced by the directory containing the loaded configuration file.
pub const CONFIGURATION_DIRECTORY_PLACEHOLDER: &str = "{CONFIGURATION_DIRECTORY}";


/// Returns the default configuration filepath, which is at
/// `{current directory}/config.toml`.
pub fn get_default_configuration_file_path() -> Result<PathBuf> {
    let mut configuration_filepath = current_dir()
        .into_diagnostic()
        .wrap_err_with(|| miette!("Could not get the current directory."))?;
    configuration_filepath.push(DEFAULT_CONFIGURATION_FILE_NAME);

    if !configuration_filepath.is_file() {
        return Err(miette!(
            "Could not find {} in the current directory ({}).",
            DEFAULT_CONFIGURATION_FILE_NAME,
            configuration_filepath.display()
        ));
    }

    Ok(configuration_filepath)
}

/// Builds the placeholder map for a configuration loaded from `configuration_file_path`.
///
/// Configurations loaded from a string have no file, so the map is empty
/// and placeholders are left untouched.
pub fn placeholders_for_file(
    configuration_file_path: Option<&Path>,
) -> HashMap<&'static str, String> {
    let mut placeholders_map = HashMap::with_capacity(1);

    if let Some(directory) = configuration_file_path.and_then(Path::parent) {
        placeholders_map.insert(
            CONFIGURATION_DIRECTORY_PLACEHOLDER,
            directory.to_string_lossy().to_string(),
        );
    }

    placeholders_map
}

#[must_use = "function returns the modified path"]
pub fn replace_placeholders_in_path<S>(
    original_path: S,
    placeholders: &HashMap<&'static str, String>,
) -> PathBuf
where
    S: Into<String>,
{
    let mut path_string: String = original_path.into();

    for (key, value) in placeholders.iter() {
        path_string = path_string.replace(key, value);
    }

    PathBuf::from(path_string)
}
