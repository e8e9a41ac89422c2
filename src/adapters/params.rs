//! Parameter bundles for trade-service queries
//!
//! A bundle implements any combination of the capability traits below and
//! advertises them through the `as_*` methods of its bundle trait. Services
//! ask a bundle which capabilities it offers instead of matching on its
//! concrete type, so callers can pass only the variant they need.

use chrono::{DateTime, Utc};

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::types::{CurrencyPair, Credentials};

// =============================================================================
// Capabilities
// =============================================================================

pub trait HasCurrencyPair: Send + Sync {
    fn currency_pair(&self) -> Option<&CurrencyPair>;
}

pub trait HasOrderId: Send + Sync {
    fn order_id(&self) -> Option<&str>;
}

/// Trade-id cursor
pub trait HasIdSpan: Send + Sync {
    fn start_id(&self) -> Option<&str>;
    fn end_id(&self) -> Option<&str> {
        None
    }
}

pub trait HasTimeSpan: Send + Sync {
    fn start_time(&self) -> Option<DateTime<Utc>>;
    fn end_time(&self) -> Option<DateTime<Utc>>;
}

/// Maximum number of results
pub trait HasLimit: Send + Sync {
    fn limit(&self) -> Option<u32>;
}

/// Per-call API key and secret used instead of the client identity
pub trait HasCredentialOverride: Send + Sync {
    fn override_api_key(&self) -> Option<&str>;
    fn override_secret_key(&self) -> Option<&str>;

    /// Both set, neither set, or an invalid parameter error
    fn credential_override(&self) -> ExchangeResult<Option<Credentials>> {
        Credentials::resolve_override(self.override_api_key(), self.override_secret_key())
    }
}

// =============================================================================
// Bundles
// =============================================================================

pub trait TradeHistoryParams: Send + Sync {
    fn as_currency_pair(&self) -> Option<&dyn HasCurrencyPair> {
        None
    }
    fn as_id_span(&self) -> Option<&dyn HasIdSpan> {
        None
    }
    fn as_time_span(&self) -> Option<&dyn HasTimeSpan> {
        None
    }
    fn as_limit(&self) -> Option<&dyn HasLimit> {
        None
    }
    fn as_credential_override(&self) -> Option<&dyn HasCredentialOverride> {
        None
    }
}

pub trait OpenOrdersParams: Send + Sync {
    fn as_currency_pair(&self) -> Option<&dyn HasCurrencyPair> {
        None
    }
    fn as_credential_override(&self) -> Option<&dyn HasCredentialOverride> {
        None
    }
}

pub trait CancelOrderParams: Send + Sync {
    fn as_currency_pair(&self) -> Option<&dyn HasCurrencyPair> {
        None
    }
    fn as_order_id(&self) -> Option<&dyn HasOrderId> {
        None
    }
    fn as_credential_override(&self) -> Option<&dyn HasCredentialOverride> {
        None
    }
}

pub trait OrderQueryParams: Send + Sync {
    fn as_currency_pair(&self) -> Option<&dyn HasCurrencyPair> {
        None
    }
    fn as_order_id(&self) -> Option<&dyn HasOrderId> {
        None
    }
    fn as_credential_override(&self) -> Option<&dyn HasCredentialOverride> {
        None
    }
}

// =============================================================================
// Capability lookups used by services
// =============================================================================

/// Pair from an optional capability, `None` if absent or unset
pub fn scoped_pair(cap: Option<&dyn HasCurrencyPair>) -> Option<CurrencyPair> {
    cap.and_then(|c| c.currency_pair()).cloned()
}

pub fn require_pair(cap: Option<&dyn HasCurrencyPair>, operation: &str) -> ExchangeResult<CurrencyPair> {
    scoped_pair(cap).ok_or_else(|| {
        ExchangeError::invalid(format!("{} requires a currency pair", operation))
    })
}

pub fn require_order_id(cap: Option<&dyn HasOrderId>, operation: &str) -> ExchangeResult<String> {
    cap.and_then(|c| c.order_id())
        .filter(|id| !id.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| ExchangeError::invalid(format!("{} requires an order id", operation)))
}

pub fn credential_override(cap: Option<&dyn HasCredentialOverride>) -> ExchangeResult<Option<Credentials>> {
    match cap {
        Some(c) => c.credential_override(),
        None => Ok(None),
    }
}

// =============================================================================
// Generic bundles
// =============================================================================

/// Trade history scoped only by time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSpanTradeHistoryParams {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl HasTimeSpan for TimeSpanTradeHistoryParams {
    fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }
    fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }
}

impl TradeHistoryParams for TimeSpanTradeHistoryParams {
    fn as_time_span(&self) -> Option<&dyn HasTimeSpan> {
        Some(self)
    }
}

/// Unscoped open-orders query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultOpenOrdersParams;

impl OpenOrdersParams for DefaultOpenOrdersParams {}

/// Open orders for one pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenOrdersParamCurrencyPair {
    pub currency_pair: Option<CurrencyPair>,
}

impl OpenOrdersParamCurrencyPair {
    pub fn new(pair: CurrencyPair) -> Self {
        Self {
            currency_pair: Some(pair),
        }
    }
}

impl HasCurrencyPair for OpenOrdersParamCurrencyPair {
    fn currency_pair(&self) -> Option<&CurrencyPair> {
        self.currency_pair.as_ref()
    }
}

impl OpenOrdersParams for OpenOrdersParamCurrencyPair {
    fn as_currency_pair(&self) -> Option<&dyn HasCurrencyPair> {
        Some(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelOrderByIdParams {
    pub order_id: String,
}

impl HasOrderId for CancelOrderByIdParams {
    fn order_id(&self) -> Option<&str> {
        Some(&self.order_id)
    }
}

impl CancelOrderParams for CancelOrderByIdParams {
    fn as_order_id(&self) -> Option<&dyn HasOrderId> {
        Some(self)
    }
}

/// Cancel by pair and id, optionally with a per-call identity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CancelOrderByPairAndIdParams {
    pub currency_pair: Option<CurrencyPair>,
    pub order_id: Option<String>,
    pub api_key: Option<String>,
    pub secret_key: Option<String>,
}

impl CancelOrderByPairAndIdParams {
    pub fn new(pair: CurrencyPair, order_id: impl Into<String>) -> Self {
        Self {
            currency_pair: Some(pair),
            order_id: Some(order_id.into()),
            ..Default::default()
        }
    }

    pub fn with_credentials(mut self, api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }
}

impl HasCurrencyPair for CancelOrderByPairAndIdParams {
    fn currency_pair(&self) -> Option<&CurrencyPair> {
        self.currency_pair.as_ref()
    }
}

impl HasOrderId for CancelOrderByPairAndIdParams {
    fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }
}

impl HasCredentialOverride for CancelOrderByPairAndIdParams {
    fn override_api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
    fn override_secret_key(&self) -> Option<&str> {
        self.secret_key.as_deref()
    }
}

impl CancelOrderParams for CancelOrderByPairAndIdParams {
    fn as_currency_pair(&self) -> Option<&dyn HasCurrencyPair> {
        Some(self)
    }
    fn as_order_id(&self) -> Option<&dyn HasOrderId> {
        Some(self)
    }
    fn as_credential_override(&self) -> Option<&dyn HasCredentialOverride> {
        Some(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQueryByIdParams {
    pub order_id: String,
}

impl HasOrderId for OrderQueryByIdParams {
    fn order_id(&self) -> Option<&str> {
        Some(&self.order_id)
    }
}

impl OrderQueryParams for OrderQueryByIdParams {
    fn as_order_id(&self) -> Option<&dyn HasOrderId> {
        Some(self)
    }
}

/// Order lookup by pair and id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQueryParamCurrencyPair {
    pub currency_pair: Option<CurrencyPair>,
    pub order_id: Option<String>,
}

impl OrderQueryParamCurrencyPair {
    pub fn new(pair: CurrencyPair, order_id: impl Into<String>) -> Self {
        Self {
            currency_pair: Some(pair),
            order_id: Some(order_id.into()),
        }
    }
}

impl HasCurrencyPair for OrderQueryParamCurrencyPair {
    fn currency_pair(&self) -> Option<&CurrencyPair> {
        self.currency_pair.as_ref()
    }
}

impl HasOrderId for OrderQueryParamCurrencyPair {
    fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }
}

impl OrderQueryParams for OrderQueryParamCurrencyPair {
    fn as_currency_pair(&self) -> Option<&dyn HasCurrencyPair> {
        Some(self)
    }
    fn as_order_id(&self) -> Option<&dyn HasOrderId> {
        Some(self)
    }
}
