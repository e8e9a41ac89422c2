//! Huobi contract order translation

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::types::{HuobiContractOrderRequest, HuobiDirection, HuobiOffset, HuobiOrderPriceType};
use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::types::{Order, OrderFlag, OrderKind, OrderSide, TimeInForce};

/// Price type for a generic order
///
/// Market orders take the opponent price. Limit orders are `limit` unless
/// post-only (which wins over any time-in-force) or IOC/FOK. Stop orders
/// cannot be expressed on this endpoint.
pub fn price_type_for(order: &Order) -> ExchangeResult<HuobiOrderPriceType> {
    match order.kind {
        OrderKind::Market => Ok(HuobiOrderPriceType::Opponent),
        OrderKind::Limit { .. } if order.has_flag(&OrderFlag::PostOnly) => {
            Ok(HuobiOrderPriceType::PostOnly)
        }
        OrderKind::Limit { .. } => Ok(match order.time_in_force {
            Some(TimeInForce::Ioc) => HuobiOrderPriceType::Ioc,
            Some(TimeInForce::Fok) => HuobiOrderPriceType::Fok,
            Some(TimeInForce::Gtc) | None => HuobiOrderPriceType::Limit,
        }),
        OrderKind::Stop { .. } => Err(ExchangeError::invalid(
            "Huobi contract orders do not support stop orders",
        )),
        OrderKind::Generic { .. } => Err(ExchangeError::invalid(
            "order has no concrete type to map to a Huobi order price type",
        )),
    }
}

/// Build the `contract_order` body
///
/// The order amount is a contract count and must be whole. A user
/// reference, when present, becomes the numeric `client_order_id`.
pub fn to_contract_order(
    order: &Order,
    contract_type: &str,
    lever_rate: u32,
) -> ExchangeResult<HuobiContractOrderRequest> {
    order.validate()?;
    let order_price_type = price_type_for(order)?;

    if order.original_amount.fract() != Decimal::ZERO {
        return Err(ExchangeError::invalid(format!(
            "Huobi contract volume must be a whole number of contracts, got {}",
            order.original_amount
        )));
    }
    let volume = order.original_amount.to_i64().ok_or_else(|| {
        ExchangeError::invalid(format!("contract volume out of range: {}", order.original_amount))
    })?;

    let client_order_id = match order.user_reference.as_deref() {
        Some(reference) => Some(reference.trim().parse::<i64>().map_err(|_| {
            ExchangeError::invalid(format!(
                "Huobi client order id must be numeric, got '{}'",
                reference
            ))
        })?),
        None => None,
    };

    Ok(HuobiContractOrderRequest {
        symbol: order.currency_pair.base.code().to_string(),
        contract_type: contract_type.to_string(),
        client_order_id,
        price: order.limit_price(),
        volume,
        direction: match order.side {
            OrderSide::Buy => HuobiDirection::Buy,
            OrderSide::Sell => HuobiDirection::Sell,
        },
        offset: if order.has_flag(&OrderFlag::ClosePosition) {
            HuobiOffset::Close
        } else {
            HuobiOffset::Open
        },
        lever_rate,
        order_price_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::types::CurrencyPair;
    use rust_decimal_macros::dec;

    fn pair() -> CurrencyPair {
        CurrencyPair::new("BTC", "USD")
    }

    #[test]
    fn test_market_order_uses_opponent_price() {
        let order = Order::market(OrderSide::Buy, pair(), dec!(2));
        let req = to_contract_order(&order, "quarter", 5).unwrap();
        assert_eq!(req.order_price_type, HuobiOrderPriceType::Opponent);
        assert_eq!(req.price, None);
        assert_eq!(req.volume, 2);
        assert_eq!(req.symbol, "BTC");
        assert_eq!(req.offset, HuobiOffset::Open);
    }

    #[test]
    fn test_limit_price_types() {
        let limit = Order::limit(OrderSide::Sell, pair(), dec!(1), dec!(42000));
        assert_eq!(price_type_for(&limit).unwrap(), HuobiOrderPriceType::Limit);

        let ioc = limit.clone().with_time_in_force(TimeInForce::Ioc);
        assert_eq!(price_type_for(&ioc).unwrap(), HuobiOrderPriceType::Ioc);

        let fok = limit.clone().with_time_in_force(TimeInForce::Fok);
        assert_eq!(price_type_for(&fok).unwrap(), HuobiOrderPriceType::Fok);

        let post_only = ioc.with_flag(OrderFlag::PostOnly);
        assert_eq!(price_type_for(&post_only).unwrap(), HuobiOrderPriceType::PostOnly);
    }

    #[test]
    fn test_close_position_flag_sets_offset() {
        let order = Order::limit(OrderSide::Sell, pair(), dec!(1), dec!(42000))
            .with_flag(OrderFlag::ClosePosition)
            .with_flag(OrderFlag::PriceProtect);
        let req = to_contract_order(&order, "quarter", 10).unwrap();
        assert_eq!(req.offset, HuobiOffset::Close);
        assert_eq!(req.lever_rate, 10);
        assert_eq!(req.price, Some(dec!(42000)));
    }

    #[test]
    fn test_rejections() {
        let stop = Order::stop(OrderSide::Sell, pair(), dec!(1), dec!(40000), None);
        assert!(to_contract_order(&stop, "quarter", 5).unwrap_err().is_caller_error());

        let fractional = Order::market(OrderSide::Buy, pair(), dec!(1.5));
        assert!(to_contract_order(&fractional, "quarter", 5)
            .unwrap_err()
            .to_string()
            .contains("whole number"));

        let bad_ref = Order::market(OrderSide::Buy, pair(), dec!(1)).with_user_reference("abc");
        assert!(to_contract_order(&bad_ref, "quarter", 5).is_err());

        let good_ref = Order::market(OrderSide::Buy, pair(), dec!(1)).with_user_reference("123");
        assert_eq!(
            to_contract_order(&good_ref, "quarter", 5).unwrap().client_order_id,
            Some(123)
        );
    }
}
