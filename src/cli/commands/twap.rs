//! TWAP command.

use orderbot_core::OrderGateway;
use orderbot_execution::{place_twap_order, TwapParams};
use orderbot_monitor::Reporter;
use std::io::Write;

use crate::cli::TwapArgs;

pub async fn run<W: Write>(
    args: &TwapArgs,
    gateway: &dyn OrderGateway,
    reporter: &mut Reporter<W>,
) {
    let params = TwapParams {
        symbol: args.symbol.clone(),
        side: args.side.clone(),
        total_quantity: args.total_quantity,
        intervals: args.intervals,
        delay_secs: args.delay_seconds,
    };

    match place_twap_order(gateway, &params, &mut *reporter).await {
        Ok(outcome) => reporter.twap_finished(&outcome),
        Err(e) => reporter.order_failed(&e),
    }
}
