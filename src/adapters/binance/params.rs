//! Binance parameter bundles

use chrono::{DateTime, Utc};

use crate::adapters::params::{
    HasCredentialOverride, HasCurrencyPair, HasIdSpan, HasLimit, HasTimeSpan, TradeHistoryParams,
};
use crate::adapters::types::CurrencyPair;

/// Default trade-history bundle for Binance
///
/// Offers every capability `GET /api/v3/myTrades` understands. Setting both
/// `start_id` and a time bound is rejected by the service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BinanceTradeHistoryParams {
    pub currency_pair: Option<CurrencyPair>,
    /// Max 1000
    pub limit: Option<u32>,
    pub start_id: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub api_key: Option<String>,
    pub secret_key: Option<String>,
}

impl BinanceTradeHistoryParams {
    pub fn new(pair: CurrencyPair) -> Self {
        Self {
            currency_pair: Some(pair),
            ..Default::default()
        }
    }
}

impl HasCurrencyPair for BinanceTradeHistoryParams {
    fn currency_pair(&self) -> Option<&CurrencyPair> {
        self.currency_pair.as_ref()
    }
}

impl HasLimit for BinanceTradeHistoryParams {
    fn limit(&self) -> Option<u32> {
        self.limit
    }
}

impl HasIdSpan for BinanceTradeHistoryParams {
    fn start_id(&self) -> Option<&str> {
        self.start_id.as_deref()
    }
}

impl HasTimeSpan for BinanceTradeHistoryParams {
    fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }
    fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }
}

impl HasCredentialOverride for BinanceTradeHistoryParams {
    fn override_api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
    fn override_secret_key(&self) -> Option<&str> {
        self.secret_key.as_deref()
    }
}

impl TradeHistoryParams for BinanceTradeHistoryParams {
    fn as_currency_pair(&self) -> Option<&dyn HasCurrencyPair> {
        Some(self)
    }
    fn as_id_span(&self) -> Option<&dyn HasIdSpan> {
        Some(self)
    }
    fn as_time_span(&self) -> Option<&dyn HasTimeSpan> {
        Some(self)
    }
    fn as_limit(&self) -> Option<&dyn HasLimit> {
        Some(self)
    }
    fn as_credential_override(&self) -> Option<&dyn HasCredentialOverride> {
        Some(self)
    }
}
