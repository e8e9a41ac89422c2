//! Binance Exchange Services
//!
//! Spot trading over `/api/v3` with HMAC-SHA256 hex signatures, plus
//! USD-M futures market data over `/fapi/v1`.
//!
//! This module is organized into submodules:
//! - `config` - Endpoints, identity and receive window
//! - `types` - Wire enums and JSON payloads
//! - `translator` - Generic order to wire order and back
//! - `normalizer` - Wire records to domain entities
//! - `error_adapter` - Error code table
//! - `raw` - Signed endpoint calls
//! - `trade` - `TradeService` implementation
//! - `market_data` - Futures order book and funding rates

mod config;
pub mod error_adapter;
mod market_data;
pub mod normalizer;
mod params;
mod raw;
mod trade;
pub mod translator;
pub mod types;

pub use config::{BinanceConfig, DEFAULT_BASE_URL, DEFAULT_FUTURES_BASE_URL};
pub use market_data::{BinanceFuturesMarketDataService, DEFAULT_DEPTH, VALID_DEPTHS};
pub use params::BinanceTradeHistoryParams;
pub use raw::{BinanceTradeServiceRaw, TradeListQuery};
pub use trade::BinanceTradeService;
pub use translator::WireOrderParams;
