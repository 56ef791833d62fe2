use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::FieldConfig;
use crate::ops::locale::is_valid_locale_tag;

/// Error type for loading field configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },
}

/// Read a field config from a TOML file.
pub fn read_config(path: &Path) -> Result<FieldConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    config_from_str(&text)
}

/// Parse and check a field config.
pub fn config_from_str(text: &str) -> Result<FieldConfig, ConfigError> {
    let config: FieldConfig = toml::from_str(text)?;

    if let Some(tag) = &config.locale
        && !is_valid_locale_tag(&tag.replace('_', "-"))
    {
        return Err(ConfigError::InvalidValue {
            field: "locale",
            value: tag.clone(),
        });
    }
    if let (Some(min), Some(max)) = (config.validation.min_date, config.validation.max_date)
        && min > max
    {
        return Err(ConfigError::InvalidValue {
            field: "validation.min_date",
            value: format!("{} is after max_date {}", min, max),
        });
    }
    if config.query_timeout_ms == 0 {
        return Err(ConfigError::InvalidValue {
            field: "query_timeout_ms",
            value: "0".to_string(),
        });
    }
    Ok(config)
}
