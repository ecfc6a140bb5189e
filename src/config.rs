//! Configuration override files.
//!
//! A partial [`Configuration`] can be supplied from a file to pin values that
//! should not be inferred. Every field is optional; present fields are passed
//! through to the output unchanged.
//!
//! ```yaml
//! source: site
//! timezone: Europe/London
//! paths:
//!   static: static
//!   uploads: static/uploads
//! collections_config:
//!   posts:
//!     path: _posts
//! ```
//!
//! The format follows the extension: `.yml`/`.yaml`, `.toml` or `.json`.
//! Unknown top-level keys are rejected so typos surface instead of being
//! silently ignored.

use crate::data::DataError;
use crate::types::Configuration;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    Data(#[from] DataError),
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Loads and validates an override file.
pub fn load_config(path: &Path) -> Result<Configuration, ConfigError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let contents = std::fs::read_to_string(path)?;
    let config = parse_config(&contents, &extension)
        .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))??;

    validate(&config)?;
    Ok(config)
}

/// Deserializes by extension. `None` for an unknown extension.
fn parse_config(contents: &str, extension: &str) -> Option<Result<Configuration, DataError>> {
    let parsed = match extension {
        "yml" | "yaml" => serde_yaml_ng::from_str(contents).map_err(DataError::from),
        "toml" => toml::from_str(contents).map_err(DataError::from),
        "json" => serde_json::from_str(contents).map_err(DataError::from),
        _ => return None,
    };
    Some(parsed)
}

pub fn validate(config: &Configuration) -> Result<(), ConfigError> {
    if let Some(source) = &config.source {
        if source.starts_with('/') || Path::new(source).is_absolute() {
            return Err(ConfigError::Validation(format!(
                "source must be relative to the repository root, got '{source}'"
            )));
        }
        if source.split('/').any(|segment| segment == "..") {
            return Err(ConfigError::Validation(format!(
                "source must stay inside the repository, got '{source}'"
            )));
        }
    }
    Ok(())
}
