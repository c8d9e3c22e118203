//! Time-weighted average price execution.
//!
//! The total quantity is split into equal MARKET slices sent one after the
//! other with a fixed pause between them. The first failing slice stops the
//! run; slices already filled stay filled.

use orderbot_core::validate::{ensure_positive, normalize_symbol, parse_side};
use orderbot_core::{
    GatewayError, OrderAck, OrderGateway, OrderRequest, OrderResult, Side, ValidationError,
};
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::{debug, warn};

/// Decimal places kept in each slice quantity.
pub const SLICE_DECIMALS: u32 = 5;

/// Raw TWAP arguments as given on the command line.
#[derive(Debug, Clone)]
pub struct TwapParams {
    pub symbol: String,
    pub side: String,
    pub total_quantity: Decimal,
    pub intervals: i64,
    pub delay_secs: i64,
}

/// Validated execution plan.
#[derive(Debug, Clone, PartialEq)]
pub struct TwapPlan {
    pub symbol: String,
    pub side: Side,
    pub slice_quantity: Decimal,
    pub intervals: u64,
    pub delay: Duration,
}

impl TwapPlan {
    /// Validate arguments and compute the slice size.
    pub fn from_params(params: &TwapParams) -> Result<Self, ValidationError> {
        let side = parse_side(&params.side)?;
        let total = ensure_positive("Total quantity", params.total_quantity)?;
        let intervals = u64::try_from(params.intervals)
            .ok()
            .filter(|n| *n > 0)
            .ok_or(ValidationError::NoIntervals)?;
        let delay_secs =
            u64::try_from(params.delay_secs).map_err(|_| ValidationError::NegativeDelay)?;
        let symbol = normalize_symbol(&params.symbol)?;

        // round_dp rounds half to even
        let slice_quantity = (total / Decimal::from(intervals)).round_dp(SLICE_DECIMALS);
        if slice_quantity.is_zero() {
            return Err(ValidationError::SliceTooSmall {
                total,
                intervals,
                scale: SLICE_DECIMALS,
            });
        }

        Ok(Self {
            symbol,
            side,
            slice_quantity,
            intervals,
            delay: Duration::from_secs(delay_secs),
        })
    }
}

/// A slice that failed and ended the run.
#[derive(Debug)]
pub struct SliceFailure {
    /// 1-based slice number
    pub slice: u64,
    pub error: GatewayError,
}

/// Result of a TWAP run that passed validation.
#[derive(Debug)]
pub struct TwapOutcome {
    pub plan: TwapPlan,
    pub placed: Vec<OrderAck>,
    pub failure: Option<SliceFailure>,
}

impl TwapOutcome {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none() && self.placed.len() as u64 == self.plan.intervals
    }

    /// Quantity actually sent in accepted slices.
    ///
    /// `None` when the sum does not fit in a `Decimal`; rounding each slice up
    /// can push it past the requested total.
    pub fn executed_quantity(&self) -> Option<Decimal> {
        self.plan
            .slice_quantity
            .checked_mul(Decimal::from(self.placed.len() as u64))
            .map(|quantity| quantity.normalize())
    }
}

/// Per-slice progress callbacks.
pub trait TwapListener {
    fn slice_placed(&mut self, _slice: u64, _total: u64, _ack: &OrderAck) {}

    fn slice_failed(&mut self, _slice: u64, _total: u64, _error: &GatewayError) {}
}

/// Listener that ignores progress.
pub struct NoopListener;

impl TwapListener for NoopListener {}

/// Validate and run a TWAP split.
///
/// Sleeps `delay` after every slice except the last. Only validation errors
/// are returned as `Err`; slice failures are recorded in the outcome.
pub async fn place_twap_order(
    gateway: &dyn OrderGateway,
    params: &TwapParams,
    listener: &mut dyn TwapListener,
) -> OrderResult<TwapOutcome> {
    let plan = TwapPlan::from_params(params)?;
    debug!(
        "TWAP {} {} x {} {} every {:?}",
        plan.side, plan.intervals, plan.slice_quantity, plan.symbol, plan.delay
    );

    let mut placed = Vec::with_capacity(plan.intervals.min(1024) as usize);
    let mut failure = None;

    for slice in 1..=plan.intervals {
        let request = OrderRequest::market(plan.symbol.clone(), plan.side, plan.slice_quantity);
        match gateway.submit_order(request).await {
            Ok(ack) => {
                listener.slice_placed(slice, plan.intervals, &ack);
                placed.push(ack);
                if slice < plan.intervals {
                    tokio::time::sleep(plan.delay).await;
                }
            }
            Err(error) => {
                warn!(
                    "TWAP stopped at slice {}/{}; {} slices not sent",
                    slice,
                    plan.intervals,
                    plan.intervals - slice
                );
                listener.slice_failed(slice, plan.intervals, &error);
                failure = Some(SliceFailure { slice, error });
                break;
            }
        }
    }

    Ok(TwapOutcome {
        plan,
        placed,
        failure,
    })
}
