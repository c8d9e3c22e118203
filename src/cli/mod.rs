//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "orderbot")]
#[command(author, version, about = "Order placement for Binance USD-M futures")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (overrides the configuration file)
    #[arg(short, long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Acknowledge orders locally instead of sending them
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Place a MARKET order
    #[command(name = "market_orders")]
    MarketOrders(MarketArgs),
    /// Place a GTC LIMIT order
    #[command(name = "limit_orders")]
    LimitOrders(LimitArgs),
    /// Place a take-profit/stop-loss pair
    Oco(OcoArgs),
    /// Split a MARKET order into timed slices
    Twap(TwapArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args, Debug)]
pub struct MarketArgs {
    /// Trading pair, e.g. BTCUSDT
    pub symbol: String,

    /// BUY or SELL
    pub side: String,

    /// Order quantity
    #[arg(allow_negative_numbers = true)]
    pub quantity: Decimal,
}

#[derive(clap::Args, Debug)]
pub struct LimitArgs {
    /// Trading pair, e.g. BTCUSDT
    pub symbol: String,

    /// BUY or SELL
    pub side: String,

    /// Order quantity
    #[arg(allow_negative_numbers = true)]
    pub quantity: Decimal,

    /// Limit price
    #[arg(allow_negative_numbers = true)]
    pub price: Decimal,
}

#[derive(clap::Args, Debug)]
pub struct OcoArgs {
    /// Trading pair, e.g. BTCUSDT
    pub symbol: String,

    /// Side of the position being protected (BUY or SELL)
    pub side: String,

    /// Quantity of each leg
    #[arg(allow_negative_numbers = true)]
    pub quantity: Decimal,

    /// Take-profit trigger price
    #[arg(allow_negative_numbers = true)]
    pub take_profit_price: Decimal,

    /// Stop-loss trigger price
    #[arg(allow_negative_numbers = true)]
    pub stop_price: Decimal,
}

#[derive(clap::Args, Debug)]
pub struct TwapArgs {
    /// Trading pair, e.g. BTCUSDT
    pub symbol: String,

    /// BUY or SELL
    pub side: String,

    /// Total quantity across all slices
    #[arg(allow_negative_numbers = true)]
    pub total_quantity: Decimal,

    /// Number of slices
    #[arg(allow_negative_numbers = true)]
    pub intervals: i64,

    /// Seconds to wait between slices
    #[arg(allow_negative_numbers = true)]
    pub delay_seconds: i64,
}
