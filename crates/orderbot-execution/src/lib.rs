//! Order submitters.
//!
//! Each submitter validates its arguments, builds one request per exchange
//! call and awaits the gateway sequentially. Failures are returned as typed
//! errors; reporting them is left to the caller.

mod limit;
mod market;
mod oco;
mod twap;

#[cfg(test)]
mod testing;

pub use limit::place_limit_order;
pub use market::place_market_order;
pub use oco::{place_oco_order, OcoError, OcoOrders};
pub use twap::{
    place_twap_order, NoopListener, SliceFailure, TwapListener, TwapOutcome, TwapParams, TwapPlan,
    SLICE_DECIMALS,
};
