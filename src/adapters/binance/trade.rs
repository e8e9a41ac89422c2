//! Binance spot trade service
//!
//! Validates caller parameters, translates orders and delegates each
//! operation to exactly one raw signed call.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::config::BinanceConfig;
use super::normalizer;
use super::params::BinanceTradeHistoryParams;
use super::raw::{BinanceTradeServiceRaw, TradeListQuery};
use super::translator::{self, from_wire_order, symbol_for};
use super::types::BinanceOrderType;
use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::params::{
    credential_override, require_order_id, require_pair, scoped_pair, CancelOrderParams,
    OpenOrdersParamCurrencyPair, OpenOrdersParams, OrderQueryParams, TradeHistoryParams,
};
use crate::adapters::traits::TradeService;
use crate::adapters::transport::RestTransport;
use crate::adapters::types::{
    CurrencyPair, Credentials, OpenOrders, Order, OrderType, TimeInForce, UserTrades,
};

const EXCHANGE_NAME: &str = "binance";

/// Parse an order id; Binance ids are 64-bit integers
fn parse_order_id(id: &str) -> ExchangeResult<i64> {
    id.trim()
        .parse::<i64>()
        .map_err(|_| ExchangeError::invalid(format!("Binance order id must be numeric, got '{}'", id)))
}

/// Binance spot implementation of `TradeService`
#[derive(Debug)]
pub struct BinanceTradeService<T> {
    raw: BinanceTradeServiceRaw<T>,
}

impl<T: RestTransport> BinanceTradeService<T> {
    pub fn new(config: BinanceConfig, transport: T) -> Self {
        Self {
            raw: BinanceTradeServiceRaw::new(config, transport),
        }
    }

    /// Signed endpoint access without translation
    pub fn raw(&self) -> &BinanceTradeServiceRaw<T> {
        &self.raw
    }

    /// Place an order with an explicit wire type, prices and time-in-force
    ///
    /// # Returns
    /// The exchange-assigned order id
    pub async fn place_order(
        &self,
        wire_type: BinanceOrderType,
        order: &Order,
        limit_price: Option<Decimal>,
        stop_price: Option<Decimal>,
        time_in_force: Option<TimeInForce>,
        credentials: Option<&Credentials>,
    ) -> ExchangeResult<String> {
        let params = translator::to_wire_order(wire_type, order, limit_price, stop_price, time_in_force)?;
        let ack = self.raw.new_order(&params, credentials).await?;

        tracing::info!(
            exchange = EXCHANGE_NAME,
            symbol = %ack.symbol,
            order_id = ack.order_id,
            order_type = wire_type.as_str(),
            side = params.side.as_str(),
            quantity = %params.quantity,
            "Order placed"
        );
        Ok(ack.order_id.to_string())
    }

    /// Validate an order on the dry-run endpoint; nothing is booked
    ///
    /// Time-in-force is taken from the order only, without defaults.
    pub async fn place_test_order(
        &self,
        wire_type: BinanceOrderType,
        order: &Order,
        limit_price: Option<Decimal>,
        stop_price: Option<Decimal>,
        credentials: Option<&Credentials>,
    ) -> ExchangeResult<()> {
        let params =
            translator::to_wire_order(wire_type, order, limit_price, stop_price, order.time_in_force)?;
        self.raw.test_new_order(&params, credentials).await?;

        tracing::info!(
            exchange = EXCHANGE_NAME,
            symbol = %params.symbol,
            order_type = wire_type.as_str(),
            "Test order accepted"
        );
        Ok(())
    }

    /// Open orders for one pair under an optional per-call identity
    pub async fn get_open_orders_for(
        &self,
        pair: Option<&CurrencyPair>,
        credentials: Option<&Credentials>,
    ) -> ExchangeResult<OpenOrders> {
        let symbol = pair.map(symbol_for);
        let records = self.raw.open_orders(symbol.as_deref(), credentials).await?;
        Ok(normalizer::open_orders(&records, pair))
    }
}

#[async_trait]
impl<T: RestTransport> TradeService for BinanceTradeService<T> {
    fn exchange_name(&self) -> &'static str {
        EXCHANGE_NAME
    }

    async fn place_market_order(&self, order: &Order) -> ExchangeResult<String> {
        if order.order_type() != Some(OrderType::Market) {
            return Err(ExchangeError::invalid("place_market_order requires a market order"));
        }
        self.place_order(BinanceOrderType::Market, order, None, None, None, None)
            .await
    }

    async fn place_limit_order(&self, order: &Order) -> ExchangeResult<String> {
        if !order.is_limit() {
            return Err(ExchangeError::invalid("place_limit_order requires a limit order"));
        }
        let wire_type = translator::wire_type_for(order)?;
        let tif = translator::resolve_time_in_force(wire_type, order);
        self.place_order(wire_type, order, order.limit_price(), None, tif, None)
            .await
    }

    async fn place_stop_order(&self, order: &Order) -> ExchangeResult<String> {
        if order.stop_price().is_none() || order.order_type().is_none() {
            return Err(ExchangeError::invalid("place_stop_order requires a stop order"));
        }
        let wire_type = translator::wire_type_for(order)?;
        let tif = translator::resolve_time_in_force(wire_type, order);
        self.place_order(wire_type, order, order.limit_price(), order.stop_price(), tif, None)
            .await
    }

    async fn cancel_order(&self, params: &dyn CancelOrderParams) -> ExchangeResult<bool> {
        let pair = require_pair(params.as_currency_pair(), "cancel_order")?;
        let order_id = require_order_id(params.as_order_id(), "cancel_order")?;
        let order_id = parse_order_id(&order_id)?;
        let credentials = credential_override(params.as_credential_override())?;

        let cancelled = self
            .raw
            .cancel_order(&symbol_for(&pair), order_id, credentials.as_ref())
            .await?;

        tracing::info!(
            exchange = EXCHANGE_NAME,
            pair = %pair,
            order_id,
            status = ?cancelled.status,
            "Cancel accepted"
        );
        Ok(true)
    }

    async fn get_open_orders_with(&self, params: &dyn OpenOrdersParams) -> ExchangeResult<OpenOrders> {
        let pair = scoped_pair(params.as_currency_pair());
        let credentials = credential_override(params.as_credential_override())?;
        self.get_open_orders_for(pair.as_ref(), credentials.as_ref())
            .await
    }

    async fn get_trade_history(&self, params: &dyn TradeHistoryParams) -> ExchangeResult<UserTrades> {
        let pair = require_pair(params.as_currency_pair(), "get_trade_history")?;

        let from_id = match params.as_id_span().and_then(|s| s.start_id()) {
            Some(id) => Some(id.trim().parse::<i64>().map_err(|_| {
                ExchangeError::invalid(format!("trade history start id must be numeric, got '{}'", id))
            })?),
            None => None,
        };
        let (start_time, end_time) = match params.as_time_span() {
            Some(span) => (
                span.start_time().map(|t| t.timestamp_millis()),
                span.end_time().map(|t| t.timestamp_millis()),
            ),
            None => (None, None),
        };
        if from_id.is_some() && (start_time.is_some() || end_time.is_some()) {
            return Err(ExchangeError::invalid(
                "trade history accepts either a start id or a time range, not both",
            ));
        }

        let filter = TradeListQuery {
            symbol: symbol_for(&pair),
            limit: params.as_limit().and_then(|l| l.limit()),
            from_id,
            start_time,
            end_time,
        };
        let credentials = credential_override(params.as_credential_override())?;

        let trades = self.raw.trade_list(&filter, credentials.as_ref()).await?;
        Ok(normalizer::user_trades(&trades, Some(&pair)))
    }

    async fn get_order(&self, queries: &[&dyn OrderQueryParams]) -> ExchangeResult<Vec<Order>> {
        // All queries are validated before the first call
        let mut resolved = Vec::with_capacity(queries.len());
        for query in queries {
            let pair = require_pair(query.as_currency_pair(), "get_order")?;
            let order_id = parse_order_id(&require_order_id(query.as_order_id(), "get_order")?)?;
            let credentials = credential_override(query.as_credential_override())?;
            resolved.push((pair, order_id, credentials));
        }

        let mut orders = Vec::with_capacity(resolved.len());
        for (pair, order_id, credentials) in resolved {
            let record = self
                .raw
                .order_status(&symbol_for(&pair), order_id, credentials.as_ref())
                .await?;
            orders.push(from_wire_order(&record, Some(&pair)));
        }
        Ok(orders)
    }

    fn create_trade_history_params(&self) -> Box<dyn TradeHistoryParams> {
        Box::new(BinanceTradeHistoryParams::default())
    }

    fn create_open_orders_params(&self) -> Box<dyn OpenOrdersParams> {
        Box::new(OpenOrdersParamCurrencyPair { currency_pair: None })
    }
}
