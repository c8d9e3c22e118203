//! Scripted gateway used by the submitter tests.

use async_trait::async_trait;
use orderbot_core::{ApiError, GatewayError, OrderAck, OrderGateway, OrderRequest};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::time::Instant;

/// Records every call and fails the calls it was told to fail (1-based).
pub(crate) struct ScriptedGateway {
    calls: Mutex<Vec<(OrderRequest, Instant)>>,
    failures: Mutex<HashMap<usize, GatewayError>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
        }
    }

    pub fn fail_on(self, call: usize, error: GatewayError) -> Self {
        self.failures.lock().unwrap().insert(call, error);
        self
    }

    pub fn requests(&self) -> Vec<OrderRequest> {
        self.calls.lock().unwrap().iter().map(|(r, _)| r.clone()).collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }
}

pub(crate) fn api_error(code: i64, message: &str) -> GatewayError {
    GatewayError::Api(ApiError {
        status: 400,
        code,
        message: message.to_string(),
    })
}

#[async_trait]
impl OrderGateway for ScriptedGateway {
    async fn submit_order(&self, request: OrderRequest) -> Result<OrderAck, GatewayError> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((request, Instant::now()));
            calls.len()
        };

        if let Some(error) = self.failures.lock().unwrap().remove(&call) {
            return Err(error);
        }

        Ok(OrderAck::new(json!({ "orderId": call, "status": "NEW" })))
    }

    fn name(&self) -> &str {
        "Scripted Gateway"
    }
}
