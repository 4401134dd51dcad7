//! Configuration management for the RentGraph reporting tool

pub mod loader;
pub mod settings;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{ChartsConfig, Config, DatasetConfig, LoggingConfig};
