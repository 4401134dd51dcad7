//! Configuration loading utilities

use crate::Config;
use rentgraph_common::Result as RentGraphResult;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for rentgraph_common::RentGraphError {
    fn from(err: ConfigError) -> Self {
        rentgraph_common::RentGraphError::config(err.to_string())
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate_all().map_err(ConfigError::ValidationError)?;

        Ok(config)
    }

    /// Load configuration from the default locations
    ///
    /// Tries `RENTGRAPH_CONFIG_PATH`, then `rentgraph.yaml` / `rentgraph.yml`
    /// in the working directory, falling back to built-in defaults. Environment
    /// overrides apply in every case.
    pub fn load() -> RentGraphResult<Config> {
        let config = if let Ok(config_path) = env::var("RENTGRAPH_CONFIG_PATH") {
            debug!("Loading configuration from RENTGRAPH_CONFIG_PATH={}", config_path);
            Self::load_config(&config_path)?
        } else if Path::new("rentgraph.yaml").exists() {
            Self::load_config("rentgraph.yaml")?
        } else if Path::new("rentgraph.yml").exists() {
            Self::load_config("rentgraph.yml")?
        } else {
            let mut config = Config::default();
            Self::apply_env_overrides(&mut config)?;
            config.validate_all().map_err(ConfigError::ValidationError)?;
            config
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> RentGraphResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        // Dataset configuration overrides
        if let Ok(path) = env::var("RENTGRAPH_DATA_PATH") {
            config.dataset.path = path;
        }

        // Chart configuration overrides
        if let Ok(dir) = env::var("RENTGRAPH_CHART_DIR") {
            config.charts.output_dir = dir;
        }

        if let Ok(width) = env::var("RENTGRAPH_CHART_WIDTH") {
            config.charts.width = width.parse().map_err(|e| ConfigError::EnvParseError {
                var: "RENTGRAPH_CHART_WIDTH".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Ok(height) = env::var("RENTGRAPH_CHART_HEIGHT") {
            config.charts.height = height.parse().map_err(|e| ConfigError::EnvParseError {
                var: "RENTGRAPH_CHART_HEIGHT".to_string(),
                source: Box::new(e),
            })?;
        }

        // Logging configuration overrides
        if let Ok(level) = env::var("RENTGRAPH_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(file) = env::var("RENTGRAPH_LOG_FILE") {
            config.logging.file = Some(file);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_config_from_yaml() {
        let file = write_config_file(
            r##"
dataset:
  path: data/rentals.csv
charts:
  output_dir: out/charts
  width: 1200
  height: 700
  background_color: "#FAFAFA"
logging:
  level: debug
  file: null
  colored: false
"##,
        );

        let config = ConfigLoader::load_config(file.path()).unwrap();
        assert_eq!(config.dataset.path, "data/rentals.csv");
        assert_eq!(config.charts.output_dir, "out/charts");
        assert_eq!(config.charts.width, 1200);
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.colored);
    }

    #[test]
    fn test_load_config_rejects_invalid_yaml() {
        let file = write_config_file("dataset: [not, a, mapping");
        assert!(matches!(
            ConfigLoader::load_config(file.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let file = write_config_file(
            r##"
dataset:
  path: data/rentals.csv
charts:
  output_dir: charts
  width: 10
  height: 600
  background_color: "#FFFFFF"
logging:
  level: info
  file: null
  colored: true
"##,
        );

        assert!(matches!(
            ConfigLoader::load_config(file.path()),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_env_override_applies() {
        let mut config = Config::default();
        env::set_var("RENTGRAPH_LOG_LEVEL", "warn");
        ConfigLoader::apply_env_overrides(&mut config).unwrap();
        env::remove_var("RENTGRAPH_LOG_LEVEL");

        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_env_override_rejects_bad_number() {
        let mut config = Config::default();
        env::set_var("RENTGRAPH_CHART_WIDTH", "wide");
        let result = ConfigLoader::apply_env_overrides(&mut config);
        env::remove_var("RENTGRAPH_CHART_WIDTH");

        assert!(matches!(result, Err(ConfigError::EnvParseError { .. })));
    }

    #[test]
    fn test_config_error_converts_to_common_error() {
        let parse_err = "nope".parse::<u32>().unwrap_err();
        let err: rentgraph_common::RentGraphError = ConfigError::EnvParseError {
            var: "RENTGRAPH_CHART_WIDTH".to_string(),
            source: Box::new(parse_err),
        }
        .into();
        assert!(err.to_string().contains("Configuration error"));
    }
}
