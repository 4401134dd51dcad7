//! Common utilities and types for the RentGraph reporting tool

pub mod dataset;
pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use dataset::Dataset;
pub use error::{RentGraphError, Result};
pub use logging::{init_default_logging, init_dev_logging, init_logging, init_prod_logging, LoggingConfig};
pub use types::RentalRecord;
