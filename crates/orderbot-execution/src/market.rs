//! Market order submission.

use orderbot_core::validate::{ensure_positive, normalize_symbol, parse_side};
use orderbot_core::{OrderAck, OrderGateway, OrderRequest, OrderResult};
use rust_decimal::Decimal;
use tracing::debug;

/// Validate and submit a single MARKET order.
pub async fn place_market_order(
    gateway: &dyn OrderGateway,
    symbol: &str,
    side: &str,
    quantity: Decimal,
) -> OrderResult<OrderAck> {
    let side = parse_side(side)?;
    let quantity = ensure_positive("Quantity", quantity)?;
    let symbol = normalize_symbol(symbol)?;

    debug!("MARKET {} {} {} via {}", side, quantity, symbol, gateway.name());
    let ack = gateway
        .submit_order(OrderRequest::market(symbol, side, quantity))
        .await?;
    Ok(ack)
}
