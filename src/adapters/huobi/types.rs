//! Huobi Contract API Types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HuobiDirection {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HuobiOffset {
    Open,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HuobiOrderPriceType {
    Limit,
    /// Best counterparty price, used for market orders
    Opponent,
    PostOnly,
    Ioc,
    Fok,
}

/// Body of `POST /api/v1/contract_order`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HuobiContractOrderRequest {
    /// Base coin, e.g. "BTC"
    pub symbol: String,
    pub contract_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<i64>,
    /// Serialized as a decimal string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Number of contracts
    pub volume: i64,
    pub direction: HuobiDirection,
    pub offset: HuobiOffset,
    pub lever_rate: u32,
    pub order_price_type: HuobiOrderPriceType,
}

/// Envelope of every contract API reply
///
/// Faults come back with HTTP 200, `status: "error"` and an error code.
#[derive(Debug, Clone, Deserialize)]
pub struct HuobiResult {
    pub status: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub err_code: Option<serde_json::Value>,
    #[serde(default)]
    pub err_msg: Option<String>,
    #[serde(default)]
    pub ts: Option<i64>,
}

impl HuobiResult {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }

    /// Error code as an integer; numeric strings are accepted, anything else is 0
    pub fn error_code(&self) -> i64 {
        match &self.err_code {
            Some(serde_json::Value::Number(n)) => n.as_i64().unwrap_or(0),
            Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    /// Order id from a placement reply
    pub fn order_id(&self) -> Option<String> {
        match self.data.as_ref()? {
            serde_json::Value::Object(map) => map
                .get("order_id_str")
                .and_then(|v| v.as_str().map(str::to_string))
                .or_else(|| map.get("order_id").map(value_to_string)),
            other => Some(value_to_string(other)),
        }
    }
}

fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_request_serializes() {
        let req = HuobiContractOrderRequest {
            symbol: "BTC".into(),
            contract_type: "quarter".into(),
            client_order_id: None,
            price: Some(dec!(42000.5)),
            volume: 3,
            direction: HuobiDirection::Buy,
            offset: HuobiOffset::Open,
            lever_rate: 5,
            order_price_type: HuobiOrderPriceType::PostOnly,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["price"], "42000.5");
        assert_eq!(json["direction"], "buy");
        assert_eq!(json["order_price_type"], "post_only");
        assert!(json.get("client_order_id").is_none());
    }

    #[test]
    fn test_result_ok_with_order_id() {
        let body = r#"{"status":"ok","data":{"order_id":633766664829804544,"order_id_str":"633766664829804544"},"ts":1158797866555}"#;
        let result: HuobiResult = serde_json::from_str(body).unwrap();
        assert!(result.is_ok());
        assert_eq!(result.order_id().as_deref(), Some("633766664829804544"));
    }

    #[test]
    fn test_result_error_code_forms() {
        let body = r#"{"status":"error","err_code":1047,"err_msg":"Insufficient margin available.","ts":1}"#;
        let result: HuobiResult = serde_json::from_str(body).unwrap();
        assert!(!result.is_ok());
        assert_eq!(result.error_code(), 1047);

        let body = r#"{"status":"error","err_code":"1032","err_msg":"limit"}"#;
        let result: HuobiResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.error_code(), 1032);
    }
}
