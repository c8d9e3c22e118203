//! Core types and traits for orderbot.
//!
//! This crate provides the building blocks shared by every command:
//! - Order request and acknowledgement types
//! - Input validation helpers
//! - The error hierarchy (validation, exchange API, transport)
//! - The `OrderGateway` trait implemented by exchange clients

pub mod error;
pub mod traits;
pub mod types;
pub mod validate;

pub use error::{ApiError, GatewayError, OrderError, OrderResult, ValidationError};
pub use traits::*;
pub use types::*;
