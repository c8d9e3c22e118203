//! CLI command implementations.
//!
//! Order commands report every failure and return normally; only startup
//! problems end the process with a non-zero status.

pub mod limit;
pub mod market;
pub mod oco;
pub mod twap;
pub mod validate;
