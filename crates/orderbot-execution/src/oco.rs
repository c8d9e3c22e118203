//! Simulated one-cancels-other orders.
//!
//! Futures accounts have no native OCO order, so the pair is placed as two
//! independent trigger orders on the side opposite to the position: a
//! TAKE_PROFIT_MARKET followed by a STOP_MARKET. Nothing links the two legs.
//! If the stop-loss leg fails after the take-profit leg was accepted, the
//! take-profit order stays live and is NOT canceled here; the error carries
//! its acknowledgement so the caller can tell the user.

use orderbot_core::validate::{ensure_positive, normalize_symbol, parse_side};
use orderbot_core::{
    GatewayError, OrderAck, OrderError, OrderGateway, OrderRequest, ValidationError,
};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

/// Both legs of a simulated OCO pair.
#[derive(Debug, Clone)]
pub struct OcoOrders {
    pub take_profit: OrderAck,
    pub stop_loss: OrderAck,
}

/// Failure placing a simulated OCO pair.
#[derive(Error, Debug)]
pub enum OcoError {
    /// Nothing was left on the exchange.
    #[error(transparent)]
    NotPlaced(#[from] OrderError),

    /// The take-profit leg is live on the exchange without its stop-loss.
    #[error("{source}")]
    StopLossLegFailed {
        take_profit: OrderAck,
        source: GatewayError,
    },
}

impl From<ValidationError> for OcoError {
    fn from(err: ValidationError) -> Self {
        OcoError::NotPlaced(err.into())
    }
}

impl OcoError {
    /// Acknowledgement of a leg left live by a partial failure.
    pub fn orphaned_leg(&self) -> Option<&OrderAck> {
        match self {
            OcoError::StopLossLegFailed { take_profit, .. } => Some(take_profit),
            OcoError::NotPlaced(_) => None,
        }
    }
}

/// Validate and submit a take-profit/stop-loss pair closing a `side` position.
pub async fn place_oco_order(
    gateway: &dyn OrderGateway,
    symbol: &str,
    side: &str,
    quantity: Decimal,
    take_profit_price: Decimal,
    stop_price: Decimal,
) -> Result<OcoOrders, OcoError> {
    let side = parse_side(side)?;
    let quantity = ensure_positive("Quantity", quantity)?;
    let take_profit_price = ensure_positive("Take-profit price", take_profit_price)?;
    let stop_price = ensure_positive("Stop price", stop_price)?;
    let symbol = normalize_symbol(symbol)?;

    let exit_side = side.opposite();
    debug!(
        "OCO {} {} {}: TP {} / SL {}",
        exit_side, quantity, symbol, take_profit_price, stop_price
    );

    let take_profit = gateway
        .submit_order(OrderRequest::take_profit_market(
            symbol.clone(),
            exit_side,
            quantity,
            take_profit_price,
        ))
        .await
        .map_err(OrderError::from)?;

    let stop_loss = match gateway
        .submit_order(OrderRequest::stop_market(symbol, exit_side, quantity, stop_price))
        .await
    {
        Ok(ack) => ack,
        Err(source) => {
            warn!(
                "Stop-loss leg failed; take-profit order {:?} remains open",
                take_profit.order_id()
            );
            return Err(OcoError::StopLossLegFailed {
                take_profit,
                source,
            });
        }
    };

    Ok(OcoOrders {
        take_profit,
        stop_loss,
    })
}
