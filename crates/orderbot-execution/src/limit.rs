//! Limit order submission.

use orderbot_core::validate::{ensure_positive, normalize_symbol, parse_side};
use orderbot_core::{OrderAck, OrderGateway, OrderRequest, OrderResult};
use rust_decimal::Decimal;
use tracing::debug;

/// Validate and submit a single good-til-canceled LIMIT order.
pub async fn place_limit_order(
    gateway: &dyn OrderGateway,
    symbol: &str,
    side: &str,
    quantity: Decimal,
    price: Decimal,
) -> OrderResult<OrderAck> {
    let side = parse_side(side)?;
    let quantity = ensure_positive("Quantity", quantity)?;
    let price = ensure_positive("Price", price)?;
    let symbol = normalize_symbol(symbol)?;

    debug!("LIMIT {} {} {} @ {}", side, quantity, symbol, price);
    let ack = gateway
        .submit_order(OrderRequest::limit(symbol, side, quantity, price))
        .await?;
    Ok(ack)
}
