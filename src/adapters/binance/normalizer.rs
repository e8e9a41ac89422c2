//! Binance response normalization
//!
//! Pure conversions from Binance wire records to the shared domain model.
//! Missing or malformed optional fields are replaced by defaults and logged;
//! nothing here fails or touches the network.

use std::cmp::Reverse;

use rust_decimal::Decimal;

use super::translator::{from_wire_order, symbol_for};
use super::types::{BinanceDepth, BinanceFundingRate, BinanceOrder, BinanceOrderStatus, BinanceTrade};
use crate::adapters::types::{
    millis_to_datetime, Currency, CurrencyPair, FundingRate, OpenOrders, OrderBook, OrderBookLevel,
    OrderSide, OrderStatus, UserTrade, UserTrades,
};

/// Quote assets recognized when splitting a bare symbol, longest match first
pub const QUOTE_ASSETS: &[&str] = &[
    "FDUSD", "USDT", "BUSD", "USDC", "TUSD", "BTC", "ETH", "BNB", "EUR", "TRY",
];

/// Resolve a Binance symbol such as `BTCUSDT` to a currency pair
///
/// The scoped pair wins when its symbol matches. Otherwise a known quote
/// suffix splits the symbol; failing that the scoped pair is used, and as a
/// last resort the raw symbol becomes the base with an empty counter.
pub fn resolve_pair(symbol: &str, scoped: Option<&CurrencyPair>) -> CurrencyPair {
    if let Some(pair) = scoped {
        if symbol_for(pair).eq_ignore_ascii_case(symbol) {
            return pair.clone();
        }
    }

    let upper = symbol.to_uppercase();
    for quote in QUOTE_ASSETS {
        if let Some(base) = upper.strip_suffix(quote) {
            if !base.is_empty() {
                return CurrencyPair::new(base, quote);
            }
        }
    }

    match scoped {
        Some(pair) => pair.clone(),
        None => {
            tracing::warn!(symbol = %symbol, "Unrecognized quote asset, using symbol as base");
            CurrencyPair::new(&upper, "")
        }
    }
}

/// Parse a decimal field, substituting zero when unparseable
pub fn parse_decimal(field: &'static str, value: &str) -> Decimal {
    match value.trim().parse::<Decimal>() {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!(field, value = %value, error = %e, "Unparseable decimal, using zero");
            Decimal::ZERO
        }
    }
}

/// Parse an optional decimal field; absent or empty stays `None`
pub fn parse_optional_decimal(field: &'static str, value: Option<&str>) -> Option<Decimal> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| parse_decimal(field, v))
}

pub fn order_status(status: BinanceOrderStatus) -> OrderStatus {
    match status {
        BinanceOrderStatus::New => OrderStatus::New,
        BinanceOrderStatus::PartiallyFilled => OrderStatus::PartiallyFilled,
        BinanceOrderStatus::Filled => OrderStatus::Filled,
        BinanceOrderStatus::Canceled => OrderStatus::Canceled,
        BinanceOrderStatus::PendingCancel => OrderStatus::PendingCancel,
        BinanceOrderStatus::Rejected => OrderStatus::Rejected,
        BinanceOrderStatus::Expired | BinanceOrderStatus::ExpiredInMatch => OrderStatus::Expired,
        BinanceOrderStatus::Unknown => {
            tracing::warn!("Unknown Binance order status");
            OrderStatus::Unknown
        }
    }
}

pub fn user_trade(trade: &BinanceTrade, scoped: Option<&CurrencyPair>) -> UserTrade {
    let fee_amount = match trade.commission.as_deref() {
        Some(c) if !c.trim().is_empty() => parse_decimal("commission", c),
        _ => {
            tracing::warn!(trade_id = trade.id, "Trade without commission, using zero fee");
            Decimal::ZERO
        }
    };
    let fee_currency = trade
        .commission_asset
        .as_deref()
        .filter(|a| !a.trim().is_empty())
        .map(Currency::new);

    UserTrade {
        id: trade.id.to_string(),
        order_id: trade.order_id.to_string(),
        side: if trade.is_buyer {
            OrderSide::Buy
        } else {
            OrderSide::Sell
        },
        amount: parse_decimal("qty", &trade.qty),
        price: parse_decimal("price", &trade.price),
        currency_pair: resolve_pair(&trade.symbol, scoped),
        timestamp: millis_to_datetime(trade.time),
        fee_amount,
        fee_currency,
    }
}

/// Trades in exchange order, with the highest id as `last_id` (0 when empty)
pub fn user_trades(trades: &[BinanceTrade], scoped: Option<&CurrencyPair>) -> UserTrades {
    let last_id = trades.iter().map(|t| t.id).max().unwrap_or(0);
    UserTrades {
        trades: trades.iter().map(|t| user_trade(t, scoped)).collect(),
        last_id,
    }
}

/// Open orders partitioned into limit and other, keeping exchange order
pub fn open_orders(records: &[BinanceOrder], scoped: Option<&CurrencyPair>) -> OpenOrders {
    OpenOrders::from_orders(records.iter().map(|r| from_wire_order(r, scoped)))
}

fn level(price: &str, quantity: &str) -> OrderBookLevel {
    OrderBookLevel::new(parse_decimal("price", price), parse_decimal("quantity", quantity))
}

/// Order book with bids descending and asks ascending
pub fn order_book(depth: &BinanceDepth, pair: &CurrencyPair) -> OrderBook {
    let mut bids: Vec<OrderBookLevel> = depth.bids.iter().map(|(p, q)| level(p, q)).collect();
    let mut asks: Vec<OrderBookLevel> = depth.asks.iter().map(|(p, q)| level(p, q)).collect();
    bids.sort_by_key(|l| Reverse(l.price));
    asks.sort_by_key(|l| l.price);

    OrderBook {
        currency_pair: pair.clone(),
        bids,
        asks,
        timestamp: depth
            .transaction_time
            .or(depth.event_time)
            .map(millis_to_datetime),
    }
}

pub fn funding_rate(record: &BinanceFundingRate, scoped: Option<&CurrencyPair>) -> FundingRate {
    FundingRate {
        currency_pair: resolve_pair(&record.symbol, scoped),
        rate: parse_decimal("fundingRate", &record.funding_rate),
        funding_time: millis_to_datetime(record.funding_time),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn trade(id: i64, is_buyer: bool) -> BinanceTrade {
        BinanceTrade {
            symbol: "BNBBTC".into(),
            id,
            order_id: 100 + id,
            price: "4.00000100".into(),
            qty: "12.00000000".into(),
            commission: Some("10.10000000".into()),
            commission_asset: Some("BNB".into()),
            time: 1_499_865_549_590,
            is_buyer,
            is_maker: false,
        }
    }

    #[test]
    fn test_resolve_pair_by_suffix() {
        assert_eq!(resolve_pair("BTCUSDT", None), CurrencyPair::new("BTC", "USDT"));
        assert_eq!(resolve_pair("ETHBTC", None), CurrencyPair::new("ETH", "BTC"));
        assert_eq!(resolve_pair("BTCFDUSD", None), CurrencyPair::new("BTC", "FDUSD"));
        assert_eq!(resolve_pair("ethusdc", None), CurrencyPair::new("ETH", "USDC"));
    }

    #[test]
    fn test_resolve_pair_prefers_scope_and_falls_back() {
        let scoped = CurrencyPair::new("XYZ", "ABC");
        assert_eq!(resolve_pair("XYZABC", Some(&scoped)), scoped);
        assert_eq!(resolve_pair("QQQWWW", Some(&scoped)), scoped);

        let bare = resolve_pair("QQQWWW", None);
        assert_eq!(bare.base.code(), "QQQWWW");
        assert!(bare.counter.is_empty());
    }

    #[test]
    fn test_quote_alone_is_not_split() {
        let pair = resolve_pair("USDT", None);
        assert_eq!(pair.base.code(), "USDT");
        assert!(pair.counter.is_empty());
    }

    #[test]
    fn test_parse_decimal_defaults_to_zero() {
        assert_eq!(parse_decimal("price", "42.5"), dec!(42.5));
        assert_eq!(parse_decimal("price", "n/a"), Decimal::ZERO);
        assert_eq!(parse_optional_decimal("stopPrice", None), None);
        assert_eq!(parse_optional_decimal("stopPrice", Some("")), None);
        assert_eq!(parse_optional_decimal("stopPrice", Some("1.5")), Some(dec!(1.5)));
    }

    #[test]
    fn test_user_trade_fields() {
        let t = user_trade(&trade(28457, true), None);
        assert_eq!(t.id, "28457");
        assert_eq!(t.order_id, "28557");
        assert_eq!(t.side, OrderSide::Buy);
        assert_eq!(t.amount, dec!(12));
        assert_eq!(t.price, dec!(4.000001));
        assert_eq!(t.currency_pair, CurrencyPair::new("BNB", "BTC"));
        assert_eq!(t.fee_amount, dec!(10.1));
        assert_eq!(t.fee_currency, Some(Currency::new("BNB")));
        assert_eq!(t.timestamp.timestamp_millis(), 1_499_865_549_590);

        let sell = user_trade(&trade(1, false), None);
        assert_eq!(sell.side, OrderSide::Sell);
    }

    #[test]
    fn test_missing_fee_is_zero() {
        let mut raw = trade(1, true);
        raw.commission = None;
        raw.commission_asset = None;
        let t = user_trade(&raw, None);
        assert_eq!(t.fee_amount, Decimal::ZERO);
        assert_eq!(t.fee_currency, None);
    }

    #[test]
    fn test_last_id_is_max_trade_id() {
        let trades = vec![trade(5, true), trade(12, false), trade(3, true)];
        let result = user_trades(&trades, None);
        assert_eq!(result.last_id, 12);
        assert_eq!(result.trades.len(), 3);
        assert_eq!(result.trades[0].id, "5");

        assert_eq!(user_trades(&[], None).last_id, 0);
    }

    #[test]
    fn test_order_status_mapping() {
        assert_eq!(order_status(BinanceOrderStatus::Filled), OrderStatus::Filled);
        assert_eq!(order_status(BinanceOrderStatus::ExpiredInMatch), OrderStatus::Expired);
        assert_eq!(order_status(BinanceOrderStatus::Unknown), OrderStatus::Unknown);
    }

    #[test]
    fn test_order_book_sorted() {
        let depth = BinanceDepth {
            last_update_id: 1,
            event_time: Some(1_589_436_922_972),
            transaction_time: None,
            bids: vec![("99".into(), "1".into()), ("100".into(), "2".into())],
            asks: vec![("102".into(), "1".into()), ("101".into(), "3".into())],
        };
        let book = order_book(&depth, &CurrencyPair::new("BTC", "USDT"));
        assert_eq!(book.best_bid(), Some(dec!(100)));
        assert_eq!(book.best_ask(), Some(dec!(101)));
        assert_eq!(book.timestamp.map(|t| t.timestamp_millis()), Some(1_589_436_922_972));
    }

    #[test]
    fn test_funding_rate() {
        let record = BinanceFundingRate {
            symbol: "BTCUSDT".into(),
            funding_rate: "-0.03750000".into(),
            funding_time: 1_570_608_000_000,
        };
        let rate = funding_rate(&record, None);
        assert_eq!(rate.rate, dec!(-0.0375));
        assert_eq!(rate.currency_pair, CurrencyPair::new("BTC", "USDT"));
    }
}
