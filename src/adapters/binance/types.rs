//! Binance API Types
//!
//! Wire enums and JSON payloads for the spot `/api/v3` and futures
//! `/fapi/v1` endpoints. Unknown enum values deserialize to `Unknown`
//! instead of failing the whole payload.

use serde::{Deserialize, Serialize};

// =============================================================================
// Wire enums
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BinanceSide {
    Buy,
    Sell,
}

impl BinanceSide {
    pub fn as_str(self) -> &'static str {
        match self {
            BinanceSide::Buy => "BUY",
            BinanceSide::Sell => "SELL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BinanceOrderType {
    Limit,
    Market,
    StopLoss,
    StopLossLimit,
    TakeProfit,
    TakeProfitLimit,
    LimitMaker,
    #[serde(other)]
    Unknown,
}

impl BinanceOrderType {
    pub fn as_str(self) -> &'static str {
        match self {
            BinanceOrderType::Limit => "LIMIT",
            BinanceOrderType::Market => "MARKET",
            BinanceOrderType::StopLoss => "STOP_LOSS",
            BinanceOrderType::StopLossLimit => "STOP_LOSS_LIMIT",
            BinanceOrderType::TakeProfit => "TAKE_PROFIT",
            BinanceOrderType::TakeProfitLimit => "TAKE_PROFIT_LIMIT",
            BinanceOrderType::LimitMaker => "LIMIT_MAKER",
            BinanceOrderType::Unknown => "UNKNOWN",
        }
    }

    pub fn requires_price(self) -> bool {
        matches!(
            self,
            BinanceOrderType::Limit
                | BinanceOrderType::LimitMaker
                | BinanceOrderType::StopLossLimit
                | BinanceOrderType::TakeProfitLimit
        )
    }

    pub fn requires_stop_price(self) -> bool {
        matches!(
            self,
            BinanceOrderType::StopLoss
                | BinanceOrderType::StopLossLimit
                | BinanceOrderType::TakeProfit
                | BinanceOrderType::TakeProfitLimit
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinanceTimeInForce {
    #[serde(rename = "GTC")]
    Gtc,
    #[serde(rename = "IOC")]
    Ioc,
    #[serde(rename = "FOK")]
    Fok,
    #[serde(other)]
    Unknown,
}

impl BinanceTimeInForce {
    pub fn as_str(self) -> &'static str {
        match self {
            BinanceTimeInForce::Gtc => "GTC",
            BinanceTimeInForce::Ioc => "IOC",
            BinanceTimeInForce::Fok => "FOK",
            BinanceTimeInForce::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BinanceOrderStatus {
    New,
    PartiallyFilled,
    Filled,
    Canceled,
    PendingCancel,
    Rejected,
    Expired,
    ExpiredInMatch,
    #[serde(other)]
    Unknown,
}

// =============================================================================
// Spot payloads
// =============================================================================

/// Error payload returned with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct BinanceApiError {
    pub code: i64,
    pub msg: String,
}

/// Reply to `POST /api/v3/order` (ACK, RESULT and FULL share these fields)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceNewOrder {
    pub symbol: String,
    pub order_id: i64,
    #[serde(default)]
    pub client_order_id: Option<String>,
    #[serde(default)]
    pub transact_time: Option<i64>,
}

/// Order record from `GET /api/v3/order` and `GET /api/v3/openOrders`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceOrder {
    pub symbol: String,
    pub order_id: i64,
    #[serde(default)]
    pub client_order_id: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    pub orig_qty: String,
    #[serde(default)]
    pub executed_qty: Option<String>,
    #[serde(default, rename = "cummulativeQuoteQty")]
    pub cumulative_quote_qty: Option<String>,
    pub status: BinanceOrderStatus,
    #[serde(default)]
    pub time_in_force: Option<BinanceTimeInForce>,
    #[serde(rename = "type")]
    pub order_type: BinanceOrderType,
    pub side: BinanceSide,
    #[serde(default)]
    pub stop_price: Option<String>,
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub update_time: Option<i64>,
}

/// Reply to `DELETE /api/v3/order`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceCancelledOrder {
    pub symbol: String,
    pub order_id: i64,
    pub status: BinanceOrderStatus,
}

/// Fill record from `GET /api/v3/myTrades`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceTrade {
    pub symbol: String,
    pub id: i64,
    pub order_id: i64,
    pub price: String,
    pub qty: String,
    #[serde(default)]
    pub commission: Option<String>,
    #[serde(default)]
    pub commission_asset: Option<String>,
    pub time: i64,
    pub is_buyer: bool,
    #[serde(default)]
    pub is_maker: bool,
}

// =============================================================================
// Futures payloads
// =============================================================================

/// Reply to `GET /fapi/v1/depth`; levels are `[price, quantity]` pairs
#[derive(Debug, Clone, Deserialize)]
pub struct BinanceDepth {
    #[serde(rename = "lastUpdateId")]
    pub last_update_id: i64,
    /// Message output time
    #[serde(rename = "E", default)]
    pub event_time: Option<i64>,
    /// Transaction time
    #[serde(rename = "T", default)]
    pub transaction_time: Option<i64>,
    pub bids: Vec<(String, String)>,
    pub asks: Vec<(String, String)>,
}

/// Entry of `GET /fapi/v1/fundingRate`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceFundingRate {
    pub symbol: String,
    pub funding_rate: String,
    pub funding_time: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_record_deserializes() {
        let json = r#"{
            "symbol": "LTCBTC",
            "orderId": 1,
            "orderListId": -1,
            "clientOrderId": "myOrder1",
            "price": "0.1",
            "origQty": "1.0",
            "executedQty": "0.0",
            "cummulativeQuoteQty": "0.0",
            "status": "NEW",
            "timeInForce": "GTC",
            "type": "LIMIT",
            "side": "BUY",
            "stopPrice": "0.0",
            "icebergQty": "0.0",
            "time": 1499827319559,
            "updateTime": 1499827319559,
            "isWorking": true
        }"#;
        let order: BinanceOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_id, 1);
        assert_eq!(order.order_type, BinanceOrderType::Limit);
        assert_eq!(order.status, BinanceOrderStatus::New);
        assert_eq!(order.time_in_force, Some(BinanceTimeInForce::Gtc));
        assert_eq!(order.cumulative_quote_qty.as_deref(), Some("0.0"));
    }

    #[test]
    fn test_unknown_wire_values_do_not_fail() {
        let json = r#"{
            "symbol": "BTCUSDT",
            "orderId": 9,
            "origQty": "1",
            "status": "SOMETHING_NEW",
            "timeInForce": "GTX",
            "type": "OCO_LEG",
            "side": "SELL"
        }"#;
        let order: BinanceOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, BinanceOrderStatus::Unknown);
        assert_eq!(order.order_type, BinanceOrderType::Unknown);
        assert_eq!(order.time_in_force, Some(BinanceTimeInForce::Unknown));
    }

    #[test]
    fn test_expired_in_match_status() {
        let status: BinanceOrderStatus = serde_json::from_str(r#""EXPIRED_IN_MATCH""#).unwrap();
        assert_eq!(status, BinanceOrderStatus::ExpiredInMatch);
    }

    #[test]
    fn test_depth_levels_deserialize() {
        let json = r#"{"lastUpdateId":1027024,"E":1589436922972,"T":1589436922959,
            "bids":[["4.00000000","431.00000000"]],"asks":[["4.00000200","12.00000000"]]}"#;
        let depth: BinanceDepth = serde_json::from_str(json).unwrap();
        assert_eq!(depth.bids[0].0, "4.00000000");
        assert_eq!(depth.transaction_time, Some(1589436922959));
    }

    #[test]
    fn test_order_type_price_requirements() {
        assert!(BinanceOrderType::Limit.requires_price());
        assert!(BinanceOrderType::LimitMaker.requires_price());
        assert!(!BinanceOrderType::Market.requires_price());
        assert!(!BinanceOrderType::StopLoss.requires_price());
        assert!(BinanceOrderType::StopLoss.requires_stop_price());
        assert!(!BinanceOrderType::Limit.requires_stop_price());
    }
}
