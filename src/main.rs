//! Binance futures order CLI.

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use orderbot_config::{load_config, AppConfig, ExchangeSettings};
use orderbot_core::OrderGateway;
use orderbot_exchange::{BinanceConfig, BinanceFuturesClient, Credentials, PaperGateway};
use orderbot_monitor::{setup_logging, Reporter};
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};

const MISSING_KEYS: &str = "API keys not found. Check your .env file.";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(usage_status(&e));
        }
    };

    let result = run(cli).await;
    if let Err(e) = &result {
        error!("{:#}", e);
        eprintln!("❌ ERROR: {:#}", e);
    }
    ExitCode::from(run_status(&result))
}

/// Exit status for an argument error; `--help` and `--version` exit 0.
fn usage_status(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

/// Exit status for a finished run. Only startup failures are errors here.
fn run_status(result: &Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(&cli.config)
        .with_context(|| format!("Invalid configuration in {}", cli.config.display()))?;
    apply_overrides(&mut config, &cli);

    if matches!(cli.command, Commands::ValidateConfig) {
        return cli::commands::validate::run(&cli.config, &config);
    }

    setup_logging(
        &config.logging.level,
        config.logging.format == "json",
        Path::new(&config.logging.file),
    )
    .context("Failed to initialize logging")?;

    let gateway = build_gateway(&config.exchange, cli.dry_run)?;
    info!("Using {}", gateway.name());

    execute(cli.command, gateway.as_ref(), &mut Reporter::stdout()).await
}

/// Run an order command. Order failures are reported, not returned.
async fn execute<W: Write>(
    command: Commands,
    gateway: &dyn OrderGateway,
    reporter: &mut Reporter<W>,
) -> Result<()> {
    match command {
        Commands::MarketOrders(args) => cli::commands::market::run(&args, gateway, reporter).await,
        Commands::LimitOrders(args) => cli::commands::limit::run(&args, gateway, reporter).await,
        Commands::Oco(args) => cli::commands::oco::run(&args, gateway, reporter).await,
        Commands::Twap(args) => cli::commands::twap::run(&args, gateway, reporter).await,
        // Handled before logging starts.
        Commands::ValidateConfig => {}
    }
    Ok(())
}

/// Command-line flags win over file and environment settings.
fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(level) = cli.log_level {
        config.logging.level = level.as_str().to_string();
    }
    if cli.json_logs {
        config.logging.format = "json".to_string();
    }
}

/// Load credentials and build the gateway orders are sent through.
///
/// Credentials are required even for a dry run.
fn build_gateway(settings: &ExchangeSettings, dry_run: bool) -> Result<Box<dyn OrderGateway>> {
    let credentials = match Credentials::from_env(&settings.api_key_env, &settings.api_secret_env) {
        Ok(credentials) => credentials,
        Err(e) => {
            error!("{}", e);
            bail!(MISSING_KEYS);
        }
    };

    if dry_run {
        return Ok(Box::new(PaperGateway::new()));
    }

    let mut binance = BinanceConfig::new(credentials, settings.testnet)
        .with_recv_window(settings.recv_window_ms);
    if let Some(base_url) = &settings.base_url {
        binance = binance.with_base_url(base_url.clone());
    }
    if let Some(secs) = settings.timeout_secs {
        binance = binance.with_timeout(Duration::from_secs(secs));
    }

    let client = BinanceFuturesClient::new(binance).context("Failed to create Binance client")?;
    Ok(Box::new(client))
}
