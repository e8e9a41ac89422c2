//! Manual smoke test: send a limit order to Binance's dry-run endpoint
//!
//! Requires BINANCE_API_KEY and BINANCE_SECRET_KEY (a `.env` file works).
//! The order is validated by the exchange but never reaches the book.
//!
//! Usage: cargo run --bin test_binance_order [-- PAIR SIDE AMOUNT PRICE]
//! Example: cargo run --bin test_binance_order -- BTC/USDT buy 0.001 20000

use std::path::Path;

use anyhow::{bail, Context};
use rust_decimal::Decimal;
use tracing::{error, info};

use tradegate::adapters::binance::types::BinanceOrderType;
use tradegate::adapters::binance::{BinanceConfig, BinanceTradeService};
use tradegate::adapters::shared::ResilientTransport;
use tradegate::adapters::transport::HttpTransport;
use tradegate::adapters::types::{CurrencyPair, OrderSide};
use tradegate::bin_utils::{boot, dry_run_limit_order, DEFAULT_CONFIG_PATH};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = boot(Path::new(DEFAULT_CONFIG_PATH))?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let pair: CurrencyPair = args
        .first()
        .map(String::as_str)
        .unwrap_or("BTC/USDT")
        .parse()
        .context("invalid currency pair")?;
    let side = match args.get(1).map(|s| s.to_ascii_lowercase()).as_deref() {
        None | Some("buy") => OrderSide::Buy,
        Some("sell") => OrderSide::Sell,
        Some(other) => bail!("side must be buy or sell, got '{}'", other),
    };
    let amount: Decimal = args.get(2).map(String::as_str).unwrap_or("0.001").parse()?;
    let price: Decimal = args.get(3).map(String::as_str).unwrap_or("20000").parse()?;

    let config = BinanceConfig::from_env()?.with_settings(&cfg.binance);
    let transport = ResilientTransport::new(
        HttpTransport::new("binance", cfg.transport.timeout_ms),
        cfg.transport.retry_config(),
        "binance",
    );
    let service = BinanceTradeService::new(config, transport);

    let order = dry_run_limit_order(side, pair.clone(), amount, price);
    info!(pair = %pair, side = ?side, amount = %amount, price = %price, "Sending test order");

    match service
        .place_test_order(BinanceOrderType::Limit, &order, Some(price), None, None)
        .await
    {
        Ok(()) => {
            info!("Test order accepted");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Test order rejected");
            Err(e.into())
        }
    }
}
