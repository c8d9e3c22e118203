//! Paper gateway for dry runs.

use async_trait::async_trait;
use chrono::Utc;
use orderbot_core::{GatewayError, OrderAck, OrderGateway, OrderRequest};
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use tracing::info;
use uuid::Uuid;

/// In-memory gateway that acknowledges every order without touching the network.
pub struct PaperGateway {
    next_order_id: AtomicI64,
    submitted: Mutex<Vec<OrderRequest>>,
}

impl PaperGateway {
    pub fn new() -> Self {
        Self {
            next_order_id: AtomicI64::new(1),
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Requests accepted so far, in submission order.
    pub fn submitted(&self) -> Vec<OrderRequest> {
        self.submitted
            .lock()
            .map(|orders| orders.clone())
            .unwrap_or_default()
    }
}

impl Default for PaperGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderGateway for PaperGateway {
    async fn submit_order(&self, request: OrderRequest) -> Result<OrderAck, GatewayError> {
        let order_id = self.next_order_id.fetch_add(1, Ordering::SeqCst);
        let client_order_id = request
            .client_order_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());

        let price = |value: Option<Decimal>| {
            value
                .map(|p| p.normalize().to_string())
                .unwrap_or_else(|| "0".into())
        };

        let ack = OrderAck::new(json!({
            "orderId": order_id,
            "clientOrderId": client_order_id,
            "symbol": request.symbol,
            "side": request.side.as_str(),
            "type": request.order_type.as_str(),
            "origQty": request.quantity.normalize().to_string(),
            "price": price(request.price),
            "stopPrice": price(request.stop_price),
            "timeInForce": request.time_in_force.map(|tif| tif.as_str()),
            "status": "NEW",
            "updateTime": Utc::now().timestamp_millis(),
        }));

        self.submitted
            .lock()
            .map_err(|_| GatewayError::Transport("paper order journal poisoned".into()))?
            .push(request);

        info!("Paper order {} acknowledged", order_id);
        Ok(ack)
    }

    fn name(&self) -> &str {
        "Paper Gateway"
    }
}
