//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, ExchangeSettings, LoggingConfig};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from an optional file and the environment.
///
/// Environment variables use the `ORDERBOT__SECTION__KEY` form, e.g.
/// `ORDERBOT__EXCHANGE__TESTNET=false`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix("ORDERBOT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: AppConfig = config.try_deserialize()?;
    config.validate()?;
    Ok(config)
}
