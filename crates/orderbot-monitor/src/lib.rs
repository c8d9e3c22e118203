//! Logging and outcome reporting.

mod logging;
mod report;

pub use logging::{setup_logging, LoggingError};
pub use report::Reporter;
