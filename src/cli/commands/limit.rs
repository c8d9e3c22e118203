//! Limit order command.

use orderbot_core::OrderGateway;
use orderbot_execution::place_limit_order;
use orderbot_monitor::Reporter;
use std::io::Write;

use crate::cli::LimitArgs;

pub async fn run<W: Write>(
    args: &LimitArgs,
    gateway: &dyn OrderGateway,
    reporter: &mut Reporter<W>,
) {
    match place_limit_order(gateway, &args.symbol, &args.side, args.quantity, args.price).await {
        Ok(ack) => reporter.limit_placed(&ack),
        Err(e) => reporter.order_failed(&e),
    }
}
