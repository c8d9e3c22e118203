//! Error types for order placement.

use rust_decimal::Decimal;
use thiserror::Error;

/// Input validation errors.
///
/// These are always raised before any request is sent to the exchange.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid side '{0}'. Must be 'BUY' or 'SELL'.")]
    InvalidSide(String),

    #[error("Symbol must not be empty.")]
    EmptySymbol,

    #[error("{field} must be greater than 0.")]
    NotPositive { field: &'static str },

    #[error("Intervals must be greater than 0.")]
    NoIntervals,

    #[error("Delay must be >= 0 seconds.")]
    NegativeDelay,

    #[error("Slice quantity {total} / {intervals} rounds to zero at {scale} decimal places.")]
    SliceTooSmall {
        total: Decimal,
        intervals: u64,
        scale: u32,
    },
}

/// Rejection reported by the exchange API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("APIError(code={code}): {message}")]
pub struct ApiError {
    /// HTTP status of the response
    pub status: u16,
    /// Exchange error code (0 when the body carried none)
    pub code: i64,
    /// Exchange error message
    pub message: String,
}

/// Errors raised by an `OrderGateway`.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Binance API error: {0}")]
    Api(#[from] ApiError),

    #[error("Unexpected error: {0}")]
    Transport(String),

    #[error("Unexpected error: malformed response: {0}")]
    Decode(String),

    #[error("Invalid order request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl GatewayError {
    /// The exchange rejection, if this error carries one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            GatewayError::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// Error returned by the order submitters.
#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl OrderError {
    /// True when the order never left the process.
    pub fn is_validation(&self) -> bool {
        matches!(self, OrderError::Validation(_))
    }
}

/// Result type alias for order operations.
pub type OrderResult<T> = Result<T, OrderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = GatewayError::Api(ApiError {
            status: 400,
            code: -1121,
            message: "Invalid symbol.".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Binance API error: APIError(code=-1121): Invalid symbol."
        );
        assert_eq!(err.api_error().map(|e| e.code), Some(-1121));
    }

    #[test]
    fn test_order_error_kinds() {
        let validation: OrderError = ValidationError::NotPositive { field: "Quantity" }.into();
        assert!(validation.is_validation());
        assert_eq!(
            validation.to_string(),
            "Validation error: Quantity must be greater than 0."
        );

        let transport: OrderError = GatewayError::Transport("connection refused".into()).into();
        assert!(!transport.is_validation());
        assert_eq!(transport.to_string(), "Unexpected error: connection refused");
    }
}
