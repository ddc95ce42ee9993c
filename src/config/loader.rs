use std::path::{Path, PathBuf};

use crate::args::DEFAULT_SETTINGS_FILE;
use crate::error::{AppError, AppResult, ConfigError};

use super::types::SettingsFile;

/// Loads the settings file named on the command line, or the default
/// `regiondash.toml` when it exists.
///
/// # Errors
///
/// Returns an error when an explicitly named file cannot be read, or when
/// any settings file cannot be parsed.
pub fn load_settings(path: Option<&str>) -> AppResult<Option<SettingsFile>> {
    if let Some(path) = path {
        let path = PathBuf::from(path);
        return Ok(Some(load_settings_file(&path)?));
    }

    let default_path = PathBuf::from(DEFAULT_SETTINGS_FILE);
    if default_path.exists() {
        return Ok(Some(load_settings_file(&default_path)?));
    }

    Ok(None)
}

/// Parses one settings file, picking the format from its extension.
///
/// # Errors
///
/// Returns an error when the file cannot be read, has an unsupported
/// extension, or fails to parse.
pub fn load_settings_file(path: &Path) -> AppResult<SettingsFile> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadSettings {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml" | "ini") => toml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some("json") => serde_json::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some(ext) => Err(AppError::config(ConfigError::UnsupportedExtension {
            ext: ext.to_owned(),
        })),
        None => Err(AppError::config(ConfigError::MissingExtension)),
    }
}
