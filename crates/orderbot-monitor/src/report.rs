//! Console and log reporting of order outcomes.
//!
//! Every outcome produces one log record and one console line. Console lines
//! start with ✅ on success and ❌ on failure.

use orderbot_core::{GatewayError, OrderAck, OrderError};
use orderbot_execution::{OcoError, OcoOrders, TwapListener, TwapOutcome};
use std::fmt::Display;
use std::io::{self, Stdout, Write};
use tracing::{error, info, warn};

/// Writes outcome lines to a console and the log.
pub struct Reporter<W: Write = Stdout> {
    out: W,
}

impl Reporter<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl Display) {
        // Console write errors are ignored.
        let _ = writeln!(self.out, "{}", text);
    }

    /// Report a failure of any kind.
    pub fn failure(&mut self, err: &dyn Display) {
        error!("{}", err);
        self.line(format_args!("❌ {}", err));
    }

    pub fn order_failed(&mut self, err: &OrderError) {
        self.failure(err);
    }

    pub fn market_placed(&mut self, ack: &OrderAck) {
        info!("✅ Market order placed: {}", ack);
        self.line(format_args!("✅ Market order placed successfully: {}", ack));
    }

    pub fn limit_placed(&mut self, ack: &OrderAck) {
        info!("✅ Limit order placed: {}", ack);
        self.line(format_args!("✅ Limit order placed successfully: {}", ack));
    }

    pub fn oco_placed(
        &mut self,
        orders: &OcoOrders,
        take_profit_price: impl Display,
        stop_price: impl Display,
    ) {
        info!(
            "✅ OCO (simulated) placed: TP={}, SL={}",
            orders.take_profit, orders.stop_loss
        );
        self.line(format_args!(
            "✅ OCO order placed: Take-Profit at {}, Stop-Loss at {}",
            take_profit_price, stop_price
        ));
    }

    pub fn oco_failed(&mut self, err: &OcoError) {
        self.failure(err);
        if let Some(take_profit) = err.orphaned_leg() {
            let id = take_profit
                .order_id()
                .map(|id| id.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            warn!(
                "Take-profit order {} remains open without a stop-loss: {}",
                id, take_profit
            );
            self.line(format_args!(
                "⚠️  Take-profit order {} is still open with no stop-loss; cancel it manually.",
                id
            ));
        }
    }

    pub fn twap_finished(&mut self, outcome: &TwapOutcome) {
        let plan = &outcome.plan;
        let executed = executed_quantity(outcome);
        if outcome.is_complete() {
            info!(
                "✅ TWAP complete: {} orders of {} {}",
                plan.intervals, plan.slice_quantity, plan.symbol
            );
            self.line(format_args!(
                "✅ TWAP complete: {} {} {} in {} orders",
                plan.side,
                executed,
                plan.symbol,
                plan.intervals
            ));
        } else {
            warn!(
                "TWAP incomplete: {}/{} orders placed ({} {})",
                outcome.placed.len(),
                plan.intervals,
                executed,
                plan.symbol
            );
            self.line(format_args!(
                "❌ TWAP stopped after {}/{} orders ({} {} executed)",
                outcome.placed.len(),
                plan.intervals,
                executed,
                plan.symbol
            ));
        }
    }
}

/// Executed quantity, or `slices x size` when the sum overflows.
fn executed_quantity(outcome: &TwapOutcome) -> String {
    match outcome.executed_quantity() {
        Some(quantity) => quantity.to_string(),
        None => format!("{} x {}", outcome.placed.len(), outcome.plan.slice_quantity),
    }
}

impl<W: Write> TwapListener for Reporter<W> {
    fn slice_placed(&mut self, slice: u64, total: u64, ack: &OrderAck) {
        info!("✅ TWAP order {}/{} placed: {}", slice, total, ack);
        self.line(format_args!("✅ TWAP order {}/{} placed successfully", slice, total));
    }

    fn slice_failed(&mut self, slice: u64, _total: u64, err: &GatewayError) {
        error!("{} (TWAP order {})", err, slice);
        self.line(format_args!("❌ {} (TWAP order {})", err, slice));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderbot_core::{ApiError, Side, ValidationError};
    use orderbot_execution::{SliceFailure, TwapPlan};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::time::Duration;

    fn output(reporter: Reporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    fn ack(id: i64) -> OrderAck {
        OrderAck::new(json!({ "orderId": id, "status": "NEW" }))
    }

    fn plan() -> TwapPlan {
        TwapPlan {
            symbol: "BTCUSDT".to_string(),
            side: Side::Buy,
            slice_quantity: dec!(2.5),
            intervals: 4,
            delay: Duration::from_secs(1),
        }
    }

    #[test]
    fn test_market_success_line() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.market_placed(&ack(7));
        let text = output(reporter);
        assert!(text.starts_with("✅ Market order placed successfully: "));
        assert!(text.contains("\"orderId\":7"));
    }

    #[test]
    fn test_validation_failure_line() {
        let mut reporter = Reporter::new(Vec::new());
        let err: OrderError = ValidationError::NotPositive { field: "Quantity" }.into();
        reporter.order_failed(&err);
        assert_eq!(
            output(reporter),
            "❌ Validation error: Quantity must be greater than 0.\n"
        );
    }

    #[test]
    fn test_oco_partial_failure_warns() {
        let mut reporter = Reporter::new(Vec::new());
        let err = OcoError::StopLossLegFailed {
            take_profit: ack(11),
            source: GatewayError::Api(ApiError {
                status: 400,
                code: -2021,
                message: "Order would immediately trigger.".to_string(),
            }),
        };
        reporter.oco_failed(&err);

        let text = output(reporter);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "❌ Binance API error: APIError(code=-2021): Order would immediately trigger."
        );
        assert!(lines[1].contains("Take-profit order 11 is still open"));
    }

    #[test]
    fn test_oco_placed_line() {
        let mut reporter = Reporter::new(Vec::new());
        let orders = OcoOrders {
            take_profit: ack(1),
            stop_loss: ack(2),
        };
        reporter.oco_placed(&orders, dec!(70000), dec!(60000));
        assert_eq!(
            output(reporter),
            "✅ OCO order placed: Take-Profit at 70000, Stop-Loss at 60000\n"
        );
    }

    #[test]
    fn test_twap_progress_and_summary() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.slice_placed(1, 4, &ack(1));
        reporter.slice_failed(2, 4, &GatewayError::Transport("timed out".into()));
        let outcome = TwapOutcome {
            plan: plan(),
            placed: vec![ack(1)],
            failure: Some(SliceFailure {
                slice: 2,
                error: GatewayError::Transport("timed out".into()),
            }),
        };
        reporter.twap_finished(&outcome);

        let text = output(reporter);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "✅ TWAP order 1/4 placed successfully");
        assert_eq!(lines[1], "❌ Unexpected error: timed out (TWAP order 2)");
        assert_eq!(lines[2], "❌ TWAP stopped after 1/4 orders (2.5 BTCUSDT executed)");
    }

    #[test]
    fn test_twap_complete_summary() {
        let mut reporter = Reporter::new(Vec::new());
        let outcome = TwapOutcome {
            plan: plan(),
            placed: (1..=4).map(ack).collect(),
            failure: None,
        };
        reporter.twap_finished(&outcome);
        assert_eq!(output(reporter), "✅ TWAP complete: BUY 10 BTCUSDT in 4 orders\n");
    }

    #[test]
    fn test_twap_summary_when_total_overflows() {
        let mut reporter = Reporter::new(Vec::new());
        let outcome = TwapOutcome {
            plan: TwapPlan {
                slice_quantity: Decimal::MAX,
                intervals: 2,
                ..plan()
            },
            placed: vec![ack(1), ack(2)],
            failure: None,
        };
        reporter.twap_finished(&outcome);
        assert_eq!(
            output(reporter),
            "✅ TWAP complete: BUY 2 x 79228162514264337593543950335 BTCUSDT in 2 orders\n"
        );
    }
}
