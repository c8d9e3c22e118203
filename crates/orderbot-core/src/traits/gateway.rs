//! Order gateway trait definition.

use crate::error::GatewayError;
use crate::types::{OrderAck, OrderRequest};
use async_trait::async_trait;

/// Trait for exchange order-entry integrations.
///
/// A gateway is constructed once per process and passed explicitly to every
/// submitter. Calls are awaited one at a time.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Submit a new order.
    ///
    /// # Arguments
    /// * `request` - The order request to submit
    ///
    /// # Returns
    /// The exchange acknowledgement for the accepted order
    async fn submit_order(&self, request: OrderRequest) -> Result<OrderAck, GatewayError>;

    /// Get the gateway name.
    fn name(&self) -> &str;
}
