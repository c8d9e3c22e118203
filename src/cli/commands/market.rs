//! Market order command.

use orderbot_core::OrderGateway;
use orderbot_execution::place_market_order;
use orderbot_monitor::Reporter;
use std::io::Write;

use crate::cli::MarketArgs;

pub async fn run<W: Write>(
    args: &MarketArgs,
    gateway: &dyn OrderGateway,
    reporter: &mut Reporter<W>,
) {
    match place_market_order(gateway, &args.symbol, &args.side, args.quantity).await {
        Ok(ack) => reporter.market_placed(&ack),
        Err(e) => reporter.order_failed(&e),
    }
}
