//! Core data types.

mod order;

pub use order::{OrderAck, OrderRequest, OrderType, Side, TimeInForce};
