//! Application configuration structures

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Config {
    /// Dataset source configuration
    pub dataset: DatasetConfig,

    /// Chart rendering settings
    pub charts: ChartsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Dataset source configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DatasetConfig {
    /// Path to the rental records data file
    #[validate(length(min = 1, message = "Dataset path cannot be empty"))]
    pub path: String,
}

/// Chart rendering settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChartsConfig {
    /// Directory chart PNG files are written into
    #[validate(length(min = 1, message = "Chart output directory cannot be empty"))]
    pub output_dir: String,

    /// Chart width in pixels
    #[validate(range(min = 320, max = 4096, message = "Chart width must be between 320 and 4096 pixels"))]
    pub width: u32,

    /// Chart height in pixels
    #[validate(range(min = 240, max = 4096, message = "Chart height must be between 240 and 4096 pixels"))]
    pub height: u32,

    /// Background color as a hex string
    pub background_color: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Log level filter
    #[validate(custom(function = "validate_log_level", message = "Invalid log level"))]
    pub level: String,

    /// Optional log file path; stderr when absent
    pub file: Option<String>,

    /// Whether to colorize console output
    pub colored: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            charts: ChartsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Validate every configuration section
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()?;
        self.dataset.validate()?;
        self.charts.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: "data/hour.csv".to_string(),
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            output_dir: "charts".to_string(),
            width: 1000,
            height: 600,
            background_color: "#FFFFFF".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            colored: true,
        }
    }
}

// Custom validation functions
fn validate_log_level(level: &str) -> Result<(), validator::ValidationError> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_log_level")),
    }
}
