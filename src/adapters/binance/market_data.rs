//! Binance USD-M futures market data
//!
//! Public `/fapi/v1` endpoints; no signing involved.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::config::BinanceConfig;
use super::normalizer;
use super::raw::execute_json;
use super::translator::symbol_for;
use super::types::{BinanceDepth, BinanceFundingRate};
use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::traits::MarketDataService;
use crate::adapters::transport::{HttpMethod, RestRequest, RestTransport};
use crate::adapters::types::{CurrencyPair, FundingRate, OrderBook};

pub const DEPTH_PATH: &str = "/fapi/v1/depth";
pub const FUNDING_RATE_PATH: &str = "/fapi/v1/fundingRate";

/// Depth used when the caller does not ask for one
pub const DEFAULT_DEPTH: u32 = 100;
/// Depths accepted by `/fapi/v1/depth`
pub const VALID_DEPTHS: &[u32] = &[5, 10, 20, 50, 100, 500, 1000];

#[derive(Debug)]
pub struct BinanceFuturesMarketDataService<T> {
    config: BinanceConfig,
    transport: T,
}

impl<T: RestTransport> BinanceFuturesMarketDataService<T> {
    pub fn new(config: BinanceConfig, transport: T) -> Self {
        Self { config, transport }
    }

    fn request(&self, path: &str) -> RestRequest {
        RestRequest::new(HttpMethod::Get, self.config.futures_base_url.as_str(), path)
    }

    /// Funding rate history for a perpetual contract
    ///
    /// # Arguments
    /// * `start` / `end` - Optional funding time bounds
    /// * `limit` - Optional result count (exchange default 100, max 1000)
    pub async fn funding_rates(
        &self,
        pair: &CurrencyPair,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        limit: Option<u32>,
    ) -> ExchangeResult<Vec<FundingRate>> {
        let mut request = self
            .request(FUNDING_RATE_PATH)
            .query_param("symbol", symbol_for(pair));
        if let Some(start) = start {
            request = request.query_param("startTime", start.timestamp_millis());
        }
        if let Some(end) = end {
            request = request.query_param("endTime", end.timestamp_millis());
        }
        if let Some(limit) = limit {
            request = request.query_param("limit", limit);
        }

        let records: Vec<BinanceFundingRate> = execute_json(&self.transport, request).await?;
        Ok(records
            .iter()
            .map(|r| normalizer::funding_rate(r, Some(pair)))
            .collect())
    }
}

#[async_trait]
impl<T: RestTransport> MarketDataService for BinanceFuturesMarketDataService<T> {
    fn exchange_name(&self) -> &'static str {
        "binance-futures"
    }

    async fn get_order_book(&self, pair: &CurrencyPair, depth: Option<u32>) -> ExchangeResult<OrderBook> {
        let depth = depth.unwrap_or(DEFAULT_DEPTH);
        if !VALID_DEPTHS.contains(&depth) {
            return Err(ExchangeError::invalid(format!(
                "order book depth must be one of {:?}, got {}",
                VALID_DEPTHS, depth
            )));
        }

        let request = self
            .request(DEPTH_PATH)
            .query_param("symbol", symbol_for(pair))
            .query_param("limit", depth);
        let raw: BinanceDepth = execute_json(&self.transport, request).await?;
        Ok(normalizer::order_book(&raw, pair))
    }
}
