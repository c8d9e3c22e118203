//! Argument validation shared by the submitters.

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::types::Side;

/// Uppercase a trading pair and reject blank input.
pub fn normalize_symbol(raw: &str) -> Result<String, ValidationError> {
    let symbol = raw.trim();
    if symbol.is_empty() {
        return Err(ValidationError::EmptySymbol);
    }
    Ok(symbol.to_uppercase())
}

/// Parse a BUY/SELL side.
pub fn parse_side(raw: &str) -> Result<Side, ValidationError> {
    raw.parse()
}

/// Require `value > 0`.
pub fn ensure_positive(field: &'static str, value: Decimal) -> Result<Decimal, ValidationError> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(value)
}
