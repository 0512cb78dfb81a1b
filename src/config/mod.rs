//! Configuration for the cs-demux tool
//!
//! Loaded from an optional TOML file; command line flags override it.
//!
//! # Example
//! ```toml
//! [demux]
//! transient_length = 8192
//! msb_direct = false
//!
//! [display]
//! facets = 4
//! ```

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::demux::DemuxConfig;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub demux: DemuxConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Summary output settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayConfig {
    /// Facets (transient_length samples each) to summarise; all data if unset
    #[serde(default)]
    pub facets: Option<usize>,
    /// Emit the summary as JSON
    #[serde(default)]
    pub json: bool,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.demux.transient_length == 0 {
            return Err(ConfigError::Invalid(
                "demux.transient_length must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.demux.transient_length, 8192);
        assert!(!config.demux.msb_direct);
        assert_eq!(config.display.facets, None);
        assert!(!config.display.json);
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r#"
            [demux]
            transient_length = 1024
            msb_direct = true

            [display]
            facets = 4
            json = true
            "#,
        )
        .unwrap();
        assert_eq!(config.demux, DemuxConfig::new(1024, true));
        assert_eq!(config.display.facets, Some(4));
        assert!(config.display.json);
    }

    #[test]
    fn test_partial_demux_section() {
        let config = Config::from_toml("[demux]\nmsb_direct = true\n").unwrap();
        assert_eq!(config.demux.transient_length, 8192);
        assert!(config.demux.msb_direct);
    }

    #[test]
    fn test_zero_transient_length_rejected() {
        let err = Config::from_toml("[demux]\ntransient_length = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml("[demux\n").unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load("/nonexistent/cs-demux.toml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
