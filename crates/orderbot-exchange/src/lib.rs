//! Exchange gateway integrations.

mod binance;
mod credentials;
mod paper;

pub use binance::{sign_query, BinanceConfig, BinanceFuturesClient, MAINNET_URL, TESTNET_URL};
pub use credentials::Credentials;
pub use paper::PaperGateway;
