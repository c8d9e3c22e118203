//! Simulated OCO command.

use orderbot_core::OrderGateway;
use orderbot_execution::place_oco_order;
use orderbot_monitor::Reporter;
use std::io::Write;

use crate::cli::OcoArgs;

pub async fn run<W: Write>(args: &OcoArgs, gateway: &dyn OrderGateway, reporter: &mut Reporter<W>) {
    let result = place_oco_order(
        gateway,
        &args.symbol,
        &args.side,
        args.quantity,
        args.take_profit_price,
        args.stop_price,
    )
    .await;

    match result {
        Ok(orders) => reporter.oco_placed(&orders, args.take_profit_price, args.stop_price),
        Err(e) => reporter.oco_failed(&e),
    }
}
