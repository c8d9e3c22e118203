//! Order types and structures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// Order side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Get the opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = ValidationError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            _ => Err(ValidationError::InvalidSide(s.to_string())),
        }
    }
}

/// Futures order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Execute immediately at the best available price
    Market,
    /// Rest on the book at the given price or better
    Limit,
    /// Market order triggered when the stop price is reached from the profitable side
    TakeProfitMarket,
    /// Market order triggered when the stop price is reached from the losing side
    StopMarket,
}

impl OrderType {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
            OrderType::TakeProfitMarket => "TAKE_PROFIT_MARKET",
            OrderType::StopMarket => "STOP_MARKET",
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time in force for orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// Good til canceled
    #[default]
    Gtc,
    /// Immediate or cancel
    Ioc,
    /// Fill or kill
    Fok,
    /// Good til crossing (post only)
    Gtx,
}

impl TimeInForce {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::Gtc => "GTC",
            TimeInForce::Ioc => "IOC",
            TimeInForce::Fok => "FOK",
            TimeInForce::Gtx => "GTX",
        }
    }
}

/// Order request for submitting a new order.
///
/// Built fresh for every call and never mutated once handed to a gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Symbol to trade, uppercased
    pub symbol: String,
    /// Buy or sell
    pub side: Side,
    /// Type of order
    pub order_type: OrderType,
    /// Quantity to trade
    pub quantity: Decimal,
    /// Limit price (limit orders)
    pub price: Option<Decimal>,
    /// Trigger price (take-profit and stop orders)
    pub stop_price: Option<Decimal>,
    /// Time in force, absent for market orders
    pub time_in_force: Option<TimeInForce>,
    /// Client-provided order ID
    pub client_order_id: Option<String>,
}

impl OrderRequest {
    fn base(
        symbol: impl Into<String>,
        side: Side,
        order_type: OrderType,
        quantity: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            side,
            order_type,
            quantity,
            price: None,
            stop_price: None,
            time_in_force: None,
            client_order_id: None,
        }
    }

    /// Create a market order request.
    pub fn market(symbol: impl Into<String>, side: Side, quantity: Decimal) -> Self {
        Self::base(symbol, side, OrderType::Market, quantity)
    }

    /// Create a good-til-canceled limit order request.
    pub fn limit(symbol: impl Into<String>, side: Side, quantity: Decimal, price: Decimal) -> Self {
        Self {
            price: Some(price),
            time_in_force: Some(TimeInForce::Gtc),
            ..Self::base(symbol, side, OrderType::Limit, quantity)
        }
    }

    /// Create a good-til-canceled take-profit-market order request.
    pub fn take_profit_market(
        symbol: impl Into<String>,
        side: Side,
        quantity: Decimal,
        stop_price: Decimal,
    ) -> Self {
        Self {
            stop_price: Some(stop_price),
            time_in_force: Some(TimeInForce::Gtc),
            ..Self::base(symbol, side, OrderType::TakeProfitMarket, quantity)
        }
    }

    /// Create a good-til-canceled stop-market order request.
    pub fn stop_market(
        symbol: impl Into<String>,
        side: Side,
        quantity: Decimal,
        stop_price: Decimal,
    ) -> Self {
        Self {
            stop_price: Some(stop_price),
            time_in_force: Some(TimeInForce::Gtc),
            ..Self::base(symbol, side, OrderType::StopMarket, quantity)
        }
    }

    /// Set a client order ID.
    pub fn with_client_order_id(mut self, id: impl Into<String>) -> Self {
        self.client_order_id = Some(id.into());
        self
    }
}

/// Acknowledgement returned by the exchange for an accepted order.
///
/// The payload is kept as-is and only forwarded to logs and the console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderAck(serde_json::Value);

impl OrderAck {
    pub fn new(raw: serde_json::Value) -> Self {
        Self(raw)
    }

    /// Exchange order id, when present.
    pub fn order_id(&self) -> Option<i64> {
        self.0.get("orderId").and_then(|v| v.as_i64())
    }

    /// Order status, when present.
    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(|v| v.as_str())
    }

    pub fn raw(&self) -> &serde_json::Value {
        &self.0
    }
}

impl std::fmt::Display for OrderAck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
