use std::path::PathBuf;
use thiserror::Error;

use super::ValidationError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings '{path}': {source}")]
    ReadSettings {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML settings '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to parse JSON settings '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported settings extension '{ext}'. Use .toml, .ini (TOML syntax) or .json.")]
    UnsupportedExtension { ext: String },
    #[error("Settings file must have a .toml, .ini or .json extension.")]
    MissingExtension,
    #[error("Invalid header: {source}")]
    InvalidHeader {
        #[source]
        source: ValidationError,
    },
    #[error("Settings '{field}' must be >= 1: {source}")]
    FieldMustBePositive {
        field: String,
        #[source]
        source: ValidationError,
    },
    #[error("Invalid regions: {source}")]
    InvalidRegions {
        #[source]
        source: ValidationError,
    },
    #[error("Invalid feed_interval: {source}")]
    InvalidFeedInterval {
        #[source]
        source: ValidationError,
    },
}
