//! Error types and utilities for RentGraph

use thiserror::Error;

/// Result type alias for RentGraph operations
pub type Result<T> = std::result::Result<T, RentGraphError>;

/// Main error type for RentGraph operations
#[derive(Error, Debug)]
pub enum RentGraphError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset loading and validation errors
    #[error("Dataset error: {message}")]
    Dataset {
        message: String,
        /// 1-based record number within the data file, when known
        line: Option<u64>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Chart generation and plotting errors
    #[error("Chart error: {message}")]
    Chart {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for user input or data
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl RentGraphError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new dataset error
    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset {
            message: msg.into(),
            line: None,
            source: None,
        }
    }

    /// Create a new dataset error pointing at a specific record
    pub fn dataset_at(msg: impl Into<String>, line: u64) -> Self {
        Self::Dataset {
            message: format!("{} (record {})", msg.into(), line),
            line: Some(line),
            source: None,
        }
    }

    /// Create a new dataset error with source
    pub fn dataset_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Dataset {
            message: msg.into(),
            line: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a new chart error
    pub fn chart(msg: impl Into<String>) -> Self {
        Self::Chart {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new chart error with source
    pub fn chart_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Chart {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }
}

// Error conversion implementations for external types

/// Convert from csv::Error to RentGraphError
impl From<csv::Error> for RentGraphError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.record());
        let message = match line {
            Some(l) => format!("CSV parsing failed (record {})", l),
            None => "CSV parsing failed".to_string(),
        };
        Self::Dataset {
            message,
            line,
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to RentGraphError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for RentGraphError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::chart_with_source("Chart rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let error = RentGraphError::new("test message");
        assert!(error.to_string().contains("test message"));

        let config_error = RentGraphError::config("config issue");
        assert!(config_error.to_string().contains("Configuration error"));
        assert!(config_error.to_string().contains("config issue"));

        let dataset_error = RentGraphError::dataset_at("bad count", 42);
        assert!(dataset_error.to_string().contains("Dataset error"));
        assert!(dataset_error.to_string().contains("bad count"));
        assert!(dataset_error.to_string().contains("record 42"));

        let validation_error = RentGraphError::validation_field("Invalid input", "years");
        assert!(validation_error.to_string().contains("Validation error"));
        assert!(validation_error.to_string().contains("Invalid input"));
    }

    #[test]
    fn test_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let wrapped_error = RentGraphError::with_source("Failed to read file", io_error);

        assert!(wrapped_error.to_string().contains("Failed to read file"));
        assert!(wrapped_error.source().is_some());

        let dataset_source_error = RentGraphError::dataset_with_source(
            "Dataset loading failed",
            io::Error::new(io::ErrorKind::PermissionDenied, "Access denied"),
        );

        assert!(dataset_source_error.to_string().contains("Dataset error"));
        assert!(dataset_source_error.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let rentgraph_error: RentGraphError = io_error.into();

        assert!(rentgraph_error.to_string().contains("I/O error"));
        assert!(rentgraph_error.source().is_some());
    }

    #[test]
    fn test_serde_error_conversion() {
        let invalid_json = r#"{"invalid": json}"#;
        let serde_error = serde_json::from_str::<serde_json::Value>(invalid_json).unwrap_err();
        let rentgraph_error: RentGraphError = serde_error.into();

        assert!(rentgraph_error.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_error_display_formatting() {
        let error = RentGraphError::new("test error");
        assert_eq!(format!("{}", error), "test error");

        let config_error = RentGraphError::config("missing field");
        assert_eq!(format!("{}", config_error), "Configuration error: missing field");

        let dataset_error = RentGraphError::dataset("truncated row");
        assert_eq!(format!("{}", dataset_error), "Dataset error: truncated row");
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<String> {
            Ok("success".to_string())
        }

        fn returns_error() -> Result<String> {
            Err(RentGraphError::new("failure"))
        }

        assert!(returns_result().is_ok());
        assert!(returns_error().is_err());
    }

    #[test]
    fn test_error_chain_preservation() {
        let root_error = io::Error::new(io::ErrorKind::NotFound, "Root cause");
        let middle_error = RentGraphError::config_with_source("Middle layer", root_error);
        let top_error = RentGraphError::with_source("Top layer", middle_error);

        assert!(top_error.to_string().contains("Top layer"));

        let mut current_error: &dyn std::error::Error = &top_error;
        let mut error_count = 0;

        while let Some(source) = current_error.source() {
            current_error = source;
            error_count += 1;
        }

        assert!(error_count >= 2);
    }
}
