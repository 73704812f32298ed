//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings. Every
//! section is optional; a missing file section falls back to its defaults.
//!
//! # Example
//!
//! ```no_run
//! use colorpath::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("colorpath.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use crate::application::model::ModelSettings;
use crate::domain::big_m::BigM;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Formulation settings.
    ///
    /// Command-line flags override these per run.
    #[serde(default)]
    pub model: ModelSettings,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.model.big_m == BigM::Fixed(0) {
            return Err(ConfigError::InvalidValue {
                field: "big_m",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("expected \"pretty\" or \"json\", got {:?}", self.logging.format),
            }
            .into());
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "level",
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging from this configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Render the effective configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigError::InvalidValue {
                field: "config",
                reason: e.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::model::{Integrality, ModelKind};
    use crate::error::Error;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.model.big_m, BigM::Fixed(1_000_000));
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn parses_every_section() {
        let config = Config::parse_toml(
            r#"
[logging]
level = "debug"
format = "json"

[model]
big_m = "nodes"
kind = "dual"
integrality = "relaxed"
"#,
        )
        .unwrap();

        assert_eq!(config.logging.format, "json");
        assert_eq!(config.model.big_m, BigM::NodeCount);
        assert_eq!(config.model.kind, ModelKind::Dual);
        assert_eq!(config.model.integrality, Integrality::Relaxed);
    }

    #[test]
    fn numeric_big_m() {
        let config = Config::parse_toml("[model]\nbig_m = 500\n").unwrap();
        assert_eq!(config.model.big_m, BigM::Fixed(500));
    }

    #[test]
    fn rejects_zero_big_m() {
        match Config::parse_toml("[model]\nbig_m = 0\n") {
            Err(Error::Config(ConfigError::InvalidValue { field: "big_m", .. })) => {}
            other => panic!("expected invalid big_m, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_log_format() {
        match Config::parse_toml("[logging]\nformat = \"xml\"\n") {
            Err(Error::Config(ConfigError::InvalidValue { field: "format", .. })) => {}
            other => panic!("expected invalid format, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_kind() {
        assert!(matches!(
            Config::parse_toml("[model]\nkind = \"both\"\n"),
            Err(Error::Config(ConfigError::Parse(_)))
        ));
    }

    #[test]
    fn renders_back_to_toml() {
        let rendered = Config::default().to_toml().unwrap();
        assert!(rendered.contains("big_m = 1000000"));
        assert_eq!(Config::parse_toml(&rendered).unwrap(), Config::default());
    }
}
