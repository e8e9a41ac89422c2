//! Binance order translation
//!
//! Maps generic orders to Binance wire order types and parameters, and
//! rebuilds generic orders from Binance order records.

use rust_decimal::Decimal;

use super::normalizer::{order_status, parse_decimal, parse_optional_decimal, resolve_pair};
use super::types::{BinanceOrder, BinanceOrderType, BinanceSide, BinanceTimeInForce};
use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::types::{
    millis_to_datetime, CurrencyPair, Order, OrderFlag, OrderKind, OrderSide, StopIntention,
    TimeInForce,
};

/// Binance symbol for a pair, e.g. `BTCUSDT`
pub fn symbol_for(pair: &CurrencyPair) -> String {
    format!("{}{}", pair.base, pair.counter)
}

pub fn side_for(side: OrderSide) -> BinanceSide {
    match side {
        OrderSide::Buy => BinanceSide::Buy,
        OrderSide::Sell => BinanceSide::Sell,
    }
}

pub fn time_in_force_for(tif: TimeInForce) -> BinanceTimeInForce {
    match tif {
        TimeInForce::Gtc => BinanceTimeInForce::Gtc,
        TimeInForce::Ioc => BinanceTimeInForce::Ioc,
        TimeInForce::Fok => BinanceTimeInForce::Fok,
    }
}

fn time_in_force_from(tif: BinanceTimeInForce) -> Option<TimeInForce> {
    match tif {
        BinanceTimeInForce::Gtc => Some(TimeInForce::Gtc),
        BinanceTimeInForce::Ioc => Some(TimeInForce::Ioc),
        BinanceTimeInForce::Fok => Some(TimeInForce::Fok),
        BinanceTimeInForce::Unknown => None,
    }
}

/// Wire order type for a generic order
///
/// Post-only limit orders become `LIMIT_MAKER`. Stop orders pick the
/// stop-loss or take-profit family from their intention and the `_LIMIT`
/// variant when a limit price is present.
pub fn wire_type_for(order: &Order) -> ExchangeResult<BinanceOrderType> {
    match &order.kind {
        OrderKind::Market => Ok(BinanceOrderType::Market),
        OrderKind::Limit { .. } if order.has_flag(&OrderFlag::PostOnly) => {
            Ok(BinanceOrderType::LimitMaker)
        }
        OrderKind::Limit { .. } => Ok(BinanceOrderType::Limit),
        OrderKind::Stop {
            limit_price,
            intention,
            ..
        } => Ok(match (intention, limit_price.is_some()) {
            (StopIntention::StopLoss, false) => BinanceOrderType::StopLoss,
            (StopIntention::StopLoss, true) => BinanceOrderType::StopLossLimit,
            (StopIntention::TakeProfit, false) => BinanceOrderType::TakeProfit,
            (StopIntention::TakeProfit, true) => BinanceOrderType::TakeProfitLimit,
        }),
        OrderKind::Generic { .. } => Err(ExchangeError::invalid(
            "order has no concrete type to map to a Binance order type",
        )),
    }
}

/// Time-in-force to send for `wire_type`
///
/// `LIMIT_MAKER` and `MARKET` never carry one. Limit-class types default to
/// GTC. Stop-market types only carry an explicitly supplied value.
pub fn resolve_time_in_force(wire_type: BinanceOrderType, order: &Order) -> Option<TimeInForce> {
    match wire_type {
        BinanceOrderType::LimitMaker | BinanceOrderType::Market => None,
        BinanceOrderType::Limit
        | BinanceOrderType::StopLossLimit
        | BinanceOrderType::TakeProfitLimit => Some(order.time_in_force.unwrap_or(TimeInForce::Gtc)),
        BinanceOrderType::StopLoss | BinanceOrderType::TakeProfit | BinanceOrderType::Unknown => {
            order.time_in_force
        }
    }
}

/// Parameters of `POST /api/v3/order`
#[derive(Debug, Clone, PartialEq)]
pub struct WireOrderParams {
    pub symbol: String,
    pub side: BinanceSide,
    pub order_type: BinanceOrderType,
    pub time_in_force: Option<BinanceTimeInForce>,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    pub stop_price: Option<Decimal>,
    pub new_client_order_id: Option<String>,
}

impl WireOrderParams {
    /// Query pairs in Binance parameter order
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("symbol".to_string(), self.symbol.clone()),
            ("side".to_string(), self.side.as_str().to_string()),
            ("type".to_string(), self.order_type.as_str().to_string()),
        ];
        if let Some(tif) = self.time_in_force {
            query.push(("timeInForce".to_string(), tif.as_str().to_string()));
        }
        query.push(("quantity".to_string(), self.quantity.normalize().to_string()));
        if let Some(price) = self.price {
            query.push(("price".to_string(), price.normalize().to_string()));
        }
        if let Some(id) = &self.new_client_order_id {
            query.push(("newClientOrderId".to_string(), id.clone()));
        }
        if let Some(stop) = self.stop_price {
            query.push(("stopPrice".to_string(), stop.normalize().to_string()));
        }
        query
    }
}

/// Build wire parameters for an explicit wire type, prices and time-in-force
///
/// Fails before any I/O when the order breaks its own invariants or the wire
/// type needs a price that was not supplied. Time-in-force is dropped for
/// `MARKET` and `LIMIT_MAKER`, which reject it.
pub fn to_wire_order(
    wire_type: BinanceOrderType,
    order: &Order,
    limit_price: Option<Decimal>,
    stop_price: Option<Decimal>,
    time_in_force: Option<TimeInForce>,
) -> ExchangeResult<WireOrderParams> {
    order.validate()?;

    if wire_type == BinanceOrderType::Unknown {
        return Err(ExchangeError::invalid("unknown Binance order type"));
    }
    if wire_type.requires_price() {
        match limit_price {
            Some(p) if p > Decimal::ZERO => {}
            _ => {
                return Err(ExchangeError::invalid(format!(
                    "{} order requires a positive limit price",
                    wire_type.as_str()
                )))
            }
        }
    }
    if wire_type.requires_stop_price() {
        match stop_price {
            Some(p) if p > Decimal::ZERO => {}
            _ => {
                return Err(ExchangeError::invalid(format!(
                    "{} order requires a positive stop price",
                    wire_type.as_str()
                )))
            }
        }
    }

    let time_in_force = match wire_type {
        BinanceOrderType::Market | BinanceOrderType::LimitMaker => None,
        _ => time_in_force.map(time_in_force_for),
    };

    Ok(WireOrderParams {
        symbol: symbol_for(&order.currency_pair),
        side: side_for(order.side),
        order_type: wire_type,
        time_in_force,
        quantity: order.original_amount,
        price: if wire_type.requires_price() { limit_price } else { None },
        stop_price: if wire_type.requires_stop_price() { stop_price } else { None },
        new_client_order_id: order.user_reference.clone(),
    })
}

/// Translate a generic order with type and time-in-force resolved from the order
pub fn translate(order: &Order) -> ExchangeResult<WireOrderParams> {
    let wire_type = wire_type_for(order)?;
    let tif = resolve_time_in_force(wire_type, order);
    to_wire_order(wire_type, order, order.limit_price(), order.stop_price(), tif)
}

fn positive(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| *v > Decimal::ZERO)
}

/// Rebuild a generic order from a Binance order record
///
/// Picks the narrowest kind the record supports. Unknown wire types, and
/// known ones missing the price they need, degrade to `OrderKind::Generic`.
pub fn from_wire_order(record: &BinanceOrder, scoped: Option<&CurrencyPair>) -> Order {
    let price = positive(parse_optional_decimal("price", record.price.as_deref()));
    let stop_price = positive(parse_optional_decimal("stopPrice", record.stop_price.as_deref()));
    let stop_intention = match record.order_type {
        BinanceOrderType::TakeProfit | BinanceOrderType::TakeProfitLimit => StopIntention::TakeProfit,
        _ => StopIntention::StopLoss,
    };

    let kind = match (record.order_type, price, stop_price) {
        (BinanceOrderType::Market, _, _) => OrderKind::Market,
        (BinanceOrderType::Limit | BinanceOrderType::LimitMaker, Some(limit_price), _) => {
            OrderKind::Limit { limit_price }
        }
        (BinanceOrderType::StopLoss | BinanceOrderType::TakeProfit, _, Some(stop_price)) => {
            OrderKind::Stop {
                stop_price,
                limit_price: None,
                intention: stop_intention,
            }
        }
        (
            BinanceOrderType::StopLossLimit | BinanceOrderType::TakeProfitLimit,
            Some(limit_price),
            Some(stop_price),
        ) => OrderKind::Stop {
            stop_price,
            limit_price: Some(limit_price),
            intention: stop_intention,
        },
        _ => OrderKind::Generic {
            limit_price: price,
            stop_price,
        },
    };

    let side = match record.side {
        BinanceSide::Buy => OrderSide::Buy,
        BinanceSide::Sell => OrderSide::Sell,
    };

    let mut order = Order::market(
        side,
        resolve_pair(&record.symbol, scoped),
        parse_decimal("origQty", &record.orig_qty),
    );
    order.kind = kind;
    if record.order_type == BinanceOrderType::LimitMaker {
        order.flags.insert(OrderFlag::PostOnly);
    } else {
        order.time_in_force = record.time_in_force.and_then(time_in_force_from);
    }

    let executed = parse_optional_decimal("executedQty", record.executed_qty.as_deref());
    let quote = parse_optional_decimal("cummulativeQuoteQty", record.cumulative_quote_qty.as_deref());
    order.average_price = match (executed, quote) {
        (Some(e), Some(q)) if e > Decimal::ZERO => Some(q / e),
        _ => None,
    };
    order.cumulative_amount = executed;
    order.id = Some(record.order_id.to_string());
    order.user_reference = record.client_order_id.clone().filter(|c| !c.is_empty());
    order.status = Some(order_status(record.status));
    order.timestamp = record.time.or(record.update_time).map(millis_to_datetime);
    order
}
