//! Core data types shared by all exchange services
//!
//! Orders, trades and books are value objects: built per call by a service
//! or normalizer and owned by the caller once returned.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::adapters::errors::{ExchangeError, ExchangeResult};

/// Current Unix time in milliseconds
pub fn current_time_ms() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

/// Convert Unix milliseconds to a UTC timestamp (epoch on overflow)
pub fn millis_to_datetime(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_default()
}

// =============================================================================
// Currencies
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Currency(String);

impl Currency {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Base/counter pair, displayed as `BTC/USDT`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: Currency,
    pub counter: Currency,
}

impl CurrencyPair {
    pub fn new(base: impl AsRef<str>, counter: impl AsRef<str>) -> Self {
        Self {
            base: Currency::new(base),
            counter: Currency::new(counter),
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.counter)
    }
}

impl FromStr for CurrencyPair {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((base, counter)) if !base.trim().is_empty() && !counter.trim().is_empty() => {
                Ok(CurrencyPair::new(base, counter))
            }
            _ => Err(ExchangeError::invalid(format!(
                "currency pair must look like BASE/COUNTER, got '{}'",
                s
            ))),
        }
    }
}

// =============================================================================
// Order vocabulary
// =============================================================================

/// Order side; for trades Buy is the bid side and Sell the ask side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

/// Generic order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    Market,
    Limit,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good till cancel
    Gtc,
    /// Immediate or cancel
    Ioc,
    /// Fill or kill
    Fok,
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeInForce::Gtc => "GTC",
            TimeInForce::Ioc => "IOC",
            TimeInForce::Fok => "FOK",
        };
        f.write_str(s)
    }
}

/// Order modifiers; only the target exchange's translator interprets them
///
/// A translator ignores flags it does not recognize.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderFlag {
    /// Rest on the book or be rejected (Binance `LIMIT_MAKER`, Huobi `post_only`)
    PostOnly,
    /// Reduce or close an open position
    ClosePosition,
    PriceProtect,
    WorkingType,
    Custom(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    New,
    PartiallyFilled,
    Filled,
    PendingCancel,
    Canceled,
    Rejected,
    Expired,
    Unknown,
}

impl OrderStatus {
    pub fn is_open(self) -> bool {
        matches!(
            self,
            OrderStatus::New | OrderStatus::PartiallyFilled | OrderStatus::PendingCancel
        )
    }
}

/// What a stop order is protecting against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StopIntention {
    #[default]
    StopLoss,
    TakeProfit,
}

/// Concrete order subtype with the prices it requires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrderKind {
    Market,
    Limit {
        limit_price: Decimal,
    },
    Stop {
        stop_price: Decimal,
        limit_price: Option<Decimal>,
        intention: StopIntention,
    },
    /// Wire order type with no narrower generic counterpart
    Generic {
        limit_price: Option<Decimal>,
        stop_price: Option<Decimal>,
    },
}

// =============================================================================
// Order
// =============================================================================

/// Exchange-agnostic order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub side: OrderSide,
    pub currency_pair: CurrencyPair,
    pub original_amount: Decimal,
    pub kind: OrderKind,
    pub time_in_force: Option<TimeInForce>,
    pub flags: HashSet<OrderFlag>,
    pub user_reference: Option<String>,
    pub id: Option<String>,
    pub status: Option<OrderStatus>,
    pub cumulative_amount: Option<Decimal>,
    pub average_price: Option<Decimal>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Order {
    fn with_kind(side: OrderSide, pair: CurrencyPair, amount: Decimal, kind: OrderKind) -> Self {
        Self {
            side,
            currency_pair: pair,
            original_amount: amount,
            kind,
            time_in_force: None,
            flags: HashSet::new(),
            user_reference: None,
            id: None,
            status: None,
            cumulative_amount: None,
            average_price: None,
            timestamp: None,
        }
    }

    pub fn market(side: OrderSide, pair: CurrencyPair, amount: Decimal) -> Self {
        Self::with_kind(side, pair, amount, OrderKind::Market)
    }

    pub fn limit(side: OrderSide, pair: CurrencyPair, amount: Decimal, limit_price: Decimal) -> Self {
        Self::with_kind(side, pair, amount, OrderKind::Limit { limit_price })
    }

    /// Stop order; with a limit price it becomes a stop-limit order
    pub fn stop(
        side: OrderSide,
        pair: CurrencyPair,
        amount: Decimal,
        stop_price: Decimal,
        limit_price: Option<Decimal>,
    ) -> Self {
        Self::with_kind(
            side,
            pair,
            amount,
            OrderKind::Stop {
                stop_price,
                limit_price,
                intention: StopIntention::StopLoss,
            },
        )
    }

    pub fn generic(side: OrderSide, pair: CurrencyPair, amount: Decimal) -> Self {
        Self::with_kind(
            side,
            pair,
            amount,
            OrderKind::Generic {
                limit_price: None,
                stop_price: None,
            },
        )
    }

    pub fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    pub fn with_flag(mut self, flag: OrderFlag) -> Self {
        self.flags.insert(flag);
        self
    }

    pub fn with_user_reference(mut self, reference: impl Into<String>) -> Self {
        self.user_reference = Some(reference.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Switch a stop order to take-profit; no-op for other kinds
    pub fn with_intention(mut self, new_intention: StopIntention) -> Self {
        if let OrderKind::Stop { intention, .. } = &mut self.kind {
            *intention = new_intention;
        }
        self
    }

    /// Generic type, `None` for orders only known by their wire type
    pub fn order_type(&self) -> Option<OrderType> {
        match self.kind {
            OrderKind::Market => Some(OrderType::Market),
            OrderKind::Limit { .. } => Some(OrderType::Limit),
            OrderKind::Stop { .. } => Some(OrderType::Stop),
            OrderKind::Generic { .. } => None,
        }
    }

    pub fn limit_price(&self) -> Option<Decimal> {
        match self.kind {
            OrderKind::Limit { limit_price } => Some(limit_price),
            OrderKind::Stop { limit_price, .. } | OrderKind::Generic { limit_price, .. } => {
                limit_price
            }
            OrderKind::Market => None,
        }
    }

    pub fn stop_price(&self) -> Option<Decimal> {
        match self.kind {
            OrderKind::Stop { stop_price, .. } => Some(stop_price),
            OrderKind::Generic { stop_price, .. } => stop_price,
            _ => None,
        }
    }

    pub fn has_flag(&self, flag: &OrderFlag) -> bool {
        self.flags.contains(flag)
    }

    pub fn is_limit(&self) -> bool {
        matches!(self.kind, OrderKind::Limit { .. })
    }

    /// Check amount and price invariants
    pub fn validate(&self) -> ExchangeResult<()> {
        if self.original_amount <= Decimal::ZERO {
            return Err(ExchangeError::invalid(format!(
                "order amount must be positive (got {})",
                self.original_amount
            )));
        }
        if let Some(price) = self.limit_price() {
            if price <= Decimal::ZERO {
                return Err(ExchangeError::invalid(format!(
                    "limit price must be positive (got {})",
                    price
                )));
            }
        }
        if let Some(price) = self.stop_price() {
            if price <= Decimal::ZERO {
                return Err(ExchangeError::invalid(format!(
                    "stop price must be positive (got {})",
                    price
                )));
            }
        }
        Ok(())
    }
}

/// Currently open orders, split by kind (not re-sorted)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenOrders {
    pub limit_orders: Vec<Order>,
    pub other_orders: Vec<Order>,
}

impl OpenOrders {
    pub fn from_orders(orders: impl IntoIterator<Item = Order>) -> Self {
        let (limit_orders, other_orders) = orders.into_iter().partition(Order::is_limit);
        Self {
            limit_orders,
            other_orders,
        }
    }

    pub fn len(&self) -> usize {
        self.limit_orders.len() + self.other_orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Trades
// =============================================================================

/// One fill of one of the caller's orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTrade {
    pub id: String,
    pub order_id: String,
    pub side: OrderSide,
    pub amount: Decimal,
    pub price: Decimal,
    pub currency_pair: CurrencyPair,
    pub timestamp: DateTime<Utc>,
    pub fee_amount: Decimal,
    pub fee_currency: Option<Currency>,
}

/// Trade history page with the highest trade id seen (0 when empty)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserTrades {
    pub trades: Vec<UserTrade>,
    pub last_id: i64,
}

impl UserTrades {
    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

// =============================================================================
// Market data
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookLevel {
    pub price: Decimal,
    pub quantity: Decimal,
}

impl OrderBookLevel {
    pub fn new(price: Decimal, quantity: Decimal) -> Self {
        Self { price, quantity }
    }
}

/// Order book snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    pub currency_pair: CurrencyPair,
    /// Bids, best (highest) first
    pub bids: Vec<OrderBookLevel>,
    /// Asks, best (lowest) first
    pub asks: Vec<OrderBookLevel>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl OrderBook {
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|l| l.price)
    }

    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|l| l.price)
    }

    pub fn mid_price(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid + ask) / Decimal::TWO),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingRate {
    pub currency_pair: CurrencyPair,
    pub rate: Decimal,
    pub funding_time: DateTime<Utc>,
}

// =============================================================================
// Credentials
// =============================================================================

/// API key and secret used to sign requests
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    secret_key: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Resolve a per-call override from an optional key/secret pair
    ///
    /// Both set: override. Neither set: `None`, the client identity is used.
    /// Only one set: invalid parameter.
    pub fn resolve_override(
        api_key: Option<&str>,
        secret_key: Option<&str>,
    ) -> ExchangeResult<Option<Self>> {
        let api_key = api_key.filter(|k| !k.is_empty());
        let secret_key = secret_key.filter(|s| !s.is_empty());
        match (api_key, secret_key) {
            (Some(key), Some(secret)) => Ok(Some(Self::new(key, secret))),
            (None, None) => Ok(None),
            (Some(_), None) => Err(ExchangeError::invalid(
                "credential override has an API key but no secret",
            )),
            (None, Some(_)) => Err(ExchangeError::invalid(
                "credential override has a secret but no API key",
            )),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
