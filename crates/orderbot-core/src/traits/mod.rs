//! Core traits.

mod gateway;

pub use gateway::OrderGateway;
