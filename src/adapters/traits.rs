//! Trade and market-data service traits
//!
//! `TradeService` is the uniform trading interface every exchange family
//! implements. Operations an exchange does not offer keep the default body
//! and fail with `ExchangeError::Unsupported` before any I/O.

use async_trait::async_trait;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::params::{
    CancelOrderParams, DefaultOpenOrdersParams, OpenOrdersParams, OrderQueryParams,
    TimeSpanTradeHistoryParams, TradeHistoryParams,
};
use crate::adapters::types::{CurrencyPair, OpenOrders, Order, OrderBook, UserTrades};

/// Common trading interface over one exchange account
///
/// Every operation is a single request/response transaction: parameters are
/// validated, the order translated and signed, one transport call issued and
/// the reply normalized. Implementations hold no per-call state and are safe
/// to share between tasks.
///
/// # Example
///
/// ```ignore
/// let service = BinanceTradeService::new(config, transport);
/// let id = service
///     .place_limit_order(&Order::limit(OrderSide::Buy, pair, dec!(0.01), dec!(42000)))
///     .await?;
/// ```
#[async_trait]
pub trait TradeService: Send + Sync {
    /// Exchange name identifier, e.g. "binance"
    fn exchange_name(&self) -> &'static str;

    /// Place a market order, returning the exchange-assigned id
    async fn place_market_order(&self, _order: &Order) -> ExchangeResult<String> {
        Err(ExchangeError::unsupported(self.exchange_name(), "place_market_order"))
    }

    /// Place a limit order, returning the exchange-assigned id
    ///
    /// Time-in-force defaults to GTC. A post-only flag may switch the wire
    /// order type on exchanges that model it that way.
    async fn place_limit_order(&self, _order: &Order) -> ExchangeResult<String> {
        Err(ExchangeError::unsupported(self.exchange_name(), "place_limit_order"))
    }

    /// Place a stop or stop-limit order, returning the exchange-assigned id
    async fn place_stop_order(&self, _order: &Order) -> ExchangeResult<String> {
        Err(ExchangeError::unsupported(self.exchange_name(), "place_stop_order"))
    }

    /// Cancel by bare id, for exchanges that do not need the pair
    async fn cancel_order_by_id(&self, _order_id: &str) -> ExchangeResult<bool> {
        Err(ExchangeError::unsupported(self.exchange_name(), "cancel_order_by_id"))
    }

    /// Cancel an order
    ///
    /// # Returns
    /// * `Ok(true)` - The exchange accepted the cancel request; the order may
    ///   still be pending cancellation
    /// * `Err(_)` - Rejected by the exchange (e.g. unknown order) or not sent
    async fn cancel_order(&self, _params: &dyn CancelOrderParams) -> ExchangeResult<bool> {
        Err(ExchangeError::unsupported(self.exchange_name(), "cancel_order"))
    }

    /// Open orders across every pair
    async fn get_open_orders(&self) -> ExchangeResult<OpenOrders> {
        self.get_open_orders_with(&DefaultOpenOrdersParams).await
    }

    /// Open orders, scoped to a pair when the bundle offers one
    async fn get_open_orders_with(&self, _params: &dyn OpenOrdersParams) -> ExchangeResult<OpenOrders> {
        Err(ExchangeError::unsupported(self.exchange_name(), "get_open_orders"))
    }

    /// Fills for one pair, with `last_id` as a pagination watermark
    async fn get_trade_history(&self, _params: &dyn TradeHistoryParams) -> ExchangeResult<UserTrades> {
        Err(ExchangeError::unsupported(self.exchange_name(), "get_trade_history"))
    }

    /// Look up orders by bare ids
    async fn get_order_by_ids(&self, _order_ids: &[String]) -> ExchangeResult<Vec<Order>> {
        Err(ExchangeError::unsupported(self.exchange_name(), "get_order_by_ids"))
    }

    /// Look up orders one query at a time; the first failure aborts the rest
    async fn get_order(&self, _queries: &[&dyn OrderQueryParams]) -> ExchangeResult<Vec<Order>> {
        Err(ExchangeError::unsupported(self.exchange_name(), "get_order"))
    }

    fn create_trade_history_params(&self) -> Box<dyn TradeHistoryParams> {
        Box::new(TimeSpanTradeHistoryParams::default())
    }

    fn create_open_orders_params(&self) -> Box<dyn OpenOrdersParams> {
        Box::new(DefaultOpenOrdersParams)
    }
}

/// Public market data
#[async_trait]
pub trait MarketDataService: Send + Sync {
    fn exchange_name(&self) -> &'static str;

    /// Order book snapshot; `depth` falls back to the exchange default
    async fn get_order_book(&self, pair: &CurrencyPair, depth: Option<u32>) -> ExchangeResult<OrderBook>;
}
