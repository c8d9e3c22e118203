//! Configuration structures.

use config::ConfigError;
use serde::{Deserialize, Serialize};

/// Largest receive window the exchange accepts.
const MAX_RECV_WINDOW_MS: u64 = 60_000;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub exchange: ExchangeSettings,
}

impl AppConfig {
    /// Check values the deserializer cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.exchange.recv_window_ms == 0 || self.exchange.recv_window_ms > MAX_RECV_WINDOW_MS {
            return Err(ConfigError::Message(format!(
                "exchange.recv_window_ms must be between 1 and {}, got {}",
                MAX_RECV_WINDOW_MS, self.exchange.recv_window_ms
            )));
        }
        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(ConfigError::Message(format!(
                "logging.format must be 'text' or 'json', got '{}'",
                self.logging.format
            )));
        }
        Ok(())
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "orderbot".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `text` or `json`
    pub format: String,
    /// Append-only log file
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            file: "bot.log".to_string(),
        }
    }
}

/// Exchange connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeSettings {
    pub api_key_env: String,
    pub api_secret_env: String,
    pub testnet: bool,
    /// Overrides the testnet/mainnet endpoint
    pub base_url: Option<String>,
    pub recv_window_ms: u64,
    /// No timeout when unset
    pub timeout_secs: Option<u64>,
}

impl Default for ExchangeSettings {
    fn default() -> Self {
        Self {
            api_key_env: "BINANCE_API_KEY".to_string(),
            api_secret_env: "BINANCE_API_SECRET".to_string(),
            testnet: true,
            base_url: None,
            recv_window_ms: 5000,
            timeout_secs: None,
        }
    }
}
