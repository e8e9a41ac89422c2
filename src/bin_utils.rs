//! Shared bootstrap utilities for binary entry points

use std::path::Path;

use rust_decimal::Decimal;

use crate::adapters::types::{CurrencyPair, Order, OrderSide, TimeInForce};
use crate::config::{self, AppConfig};
use crate::error::AppError;

/// Default location of the optional YAML configuration
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Initialize dotenv and logging only (no config.yaml needed).
pub fn boot_minimal() {
    dotenvy::dotenv().ok();
    config::init_logging();
}

/// Initialize dotenv and logging, then load `path` if it exists.
///
/// A missing file yields the default configuration; a present but invalid
/// file is an error.
pub fn boot(path: &Path) -> Result<AppConfig, AppError> {
    boot_minimal();

    if !path.exists() {
        tracing::info!(path = %path.display(), "No configuration file, using defaults");
        return Ok(AppConfig::default());
    }
    let cfg = config::load_config(path)?;
    tracing::info!(path = %path.display(), "Configuration loaded");
    Ok(cfg)
}

/// GTC limit order for the dry-run endpoint
///
/// The test endpoint takes time-in-force from the order as given, and
/// Binance rejects a LIMIT order without one.
pub fn dry_run_limit_order(
    side: OrderSide,
    pair: CurrencyPair,
    amount: Decimal,
    price: Decimal,
) -> Order {
    Order::limit(side, pair, amount, price).with_time_in_force(TimeInForce::Gtc)
}
