//! Huobi coin-margined contract trade service
//!
//! Only order placement is offered; every other `TradeService` operation
//! keeps its unsupported default.

use async_trait::async_trait;

use super::config::HuobiConfig;
use super::error_adapter;
use super::signing::signed_request;
use super::translator::to_contract_order;
use super::types::{HuobiContractOrderRequest, HuobiResult};
use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::traits::TradeService;
use crate::adapters::transport::{HttpMethod, RestTransport};
use crate::adapters::types::{Credentials, Order, OrderType};

pub const CONTRACT_ORDER_PATH: &str = "/api/v1/contract_order";

const EXCHANGE_NAME: &str = "huobi";

#[derive(Debug)]
pub struct HuobiContractTradeService<T> {
    config: HuobiConfig,
    transport: T,
}

impl<T: RestTransport> HuobiContractTradeService<T> {
    pub fn new(config: HuobiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Place a translated contract order under an optional per-call identity
    pub async fn place_contract_order(
        &self,
        body: &HuobiContractOrderRequest,
        credentials: Option<&Credentials>,
    ) -> ExchangeResult<String> {
        let configured;
        let credentials = match credentials {
            Some(c) => c,
            None => {
                configured = self.config.credentials();
                &configured
            }
        };

        let json = serde_json::to_string(body)
            .map_err(|e| ExchangeError::invalid(format!("unserializable order: {}", e)))?;
        let request = signed_request(
            HttpMethod::Post,
            &self.config.base_url,
            self.config.host(),
            CONTRACT_ORDER_PATH,
            credentials,
            chrono::Utc::now(),
        )?
        .json_body(json);

        tracing::debug!(exchange = EXCHANGE_NAME, path = CONTRACT_ORDER_PATH, "Sending request");
        let response = self.transport.execute(request).await?;

        let result = match serde_json::from_str::<HuobiResult>(&response.body) {
            Ok(result) => result,
            Err(_) if !response.is_success() => {
                return Err(error_adapter::adapt_status(response.status).into())
            }
            Err(e) => {
                return Err(ExchangeError::InvalidResponse(format!(
                    "POST {}: {}",
                    CONTRACT_ORDER_PATH, e
                )))
            }
        };

        if !result.is_ok() || !response.is_success() {
            let err = if result.is_ok() {
                error_adapter::adapt_status(response.status)
            } else {
                error_adapter::adapt(&result)
            };
            tracing::warn!(
                exchange = EXCHANGE_NAME,
                status = response.status,
                code = err.code,
                kind = %err.kind,
                message = %err.message,
                "Request rejected by exchange"
            );
            return Err(err.into());
        }

        let order_id = result
            .order_id()
            .ok_or_else(|| ExchangeError::InvalidResponse("contract order reply has no order id".into()))?;
        tracing::info!(
            exchange = EXCHANGE_NAME,
            symbol = %body.symbol,
            contract_type = %body.contract_type,
            order_id = %order_id,
            volume = body.volume,
            "Order placed"
        );
        Ok(order_id)
    }

    async fn place(&self, order: &Order) -> ExchangeResult<String> {
        let body = to_contract_order(order, &self.config.contract_type, self.config.lever_rate)?;
        self.place_contract_order(&body, None).await
    }
}

#[async_trait]
impl<T: RestTransport> TradeService for HuobiContractTradeService<T> {
    fn exchange_name(&self) -> &'static str {
        EXCHANGE_NAME
    }

    async fn place_market_order(&self, order: &Order) -> ExchangeResult<String> {
        if order.order_type() != Some(OrderType::Market) {
            return Err(ExchangeError::invalid("place_market_order requires a market order"));
        }
        self.place(order).await
    }

    async fn place_limit_order(&self, order: &Order) -> ExchangeResult<String> {
        if !order.is_limit() {
            return Err(ExchangeError::invalid("place_limit_order requires a limit order"));
        }
        self.place(order).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::errors::CommonErrorKind;
    use crate::adapters::params::{CancelOrderByPairAndIdParams, TimeSpanTradeHistoryParams};
    use crate::adapters::test_utils::MockTransport;
    use crate::adapters::types::{CurrencyPair, OrderFlag, OrderSide};
    use rust_decimal_macros::dec;

    fn service(mock: &MockTransport) -> HuobiContractTradeService<MockTransport> {
        let config = HuobiConfig {
            api_key: "huobi-key".into(),
            secret_key: "huobi-secret".into(),
            base_url: "http://hbdm.test".into(),
            ..Default::default()
        };
        HuobiContractTradeService::new(config, mock.clone())
    }

    fn pair() -> CurrencyPair {
        CurrencyPair::new("BTC", "USD")
    }

    #[tokio::test]
    async fn test_place_limit_order() {
        let mock = MockTransport::with_response(
            200,
            r#"{"status":"ok","data":{"order_id":633766664829804544,"order_id_str":"633766664829804544"},"ts":1}"#,
        );
        let svc = service(&mock);
        let order = Order::limit(OrderSide::Buy, pair(), dec!(3), dec!(42000)).with_flag(OrderFlag::PostOnly);

        let id = svc.place_limit_order(&order).await.unwrap();
        assert_eq!(id, "633766664829804544");

        let req = mock.last_request().unwrap();
        assert_eq!(req.path, CONTRACT_ORDER_PATH);
        assert_eq!(req.query_value("AccessKeyId"), Some("huobi-key"));
        assert_eq!(req.query_value("SignatureMethod"), Some("HmacSHA256"));
        assert!(req.query_value("Signature").is_some());

        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["order_price_type"], "post_only");
        assert_eq!(body["volume"], 3);
        assert_eq!(body["contract_type"], "quarter");
    }

    #[tokio::test]
    async fn test_error_envelope_with_http_200_is_adapted() {
        let mock = MockTransport::with_response(
            200,
            r#"{"status":"error","err_code":1047,"err_msg":"Insufficient margin available.","ts":1}"#,
        );
        let svc = service(&mock);
        let order = Order::market(OrderSide::Buy, pair(), dec!(1));

        let err = svc.place_market_order(&order).await.unwrap_err();
        assert_eq!(err.kind(), Some(CommonErrorKind::InsufficientFunds));
        assert_eq!(err.common().map(|c| c.code), Some(1047));
    }

    #[tokio::test]
    async fn test_http_unauthorized_without_envelope() {
        let mock = MockTransport::with_response(403, "Forbidden");
        let svc = service(&mock);
        let order = Order::market(OrderSide::Buy, pair(), dec!(1));

        let err = svc.place_market_order(&order).await.unwrap_err();
        assert_eq!(err.kind(), Some(CommonErrorKind::Unauthorized));
    }

    #[tokio::test]
    async fn test_stop_order_rejected_before_io() {
        let mock = MockTransport::new();
        let svc = service(&mock);
        let order = Order::stop(OrderSide::Sell, pair(), dec!(1), dec!(40000), None);

        assert!(svc.place_stop_order(&order).await.unwrap_err().is_caller_error());
        assert!(svc.place_limit_order(&order).await.unwrap_err().is_caller_error());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_other_operations_unsupported() {
        let mock = MockTransport::new();
        let svc = service(&mock);

        assert!(matches!(
            svc.cancel_order(&CancelOrderByPairAndIdParams::new(pair(), "1")).await,
            Err(ExchangeError::Unsupported { exchange: "huobi", .. })
        ));
        assert!(matches!(
            svc.get_trade_history(&TimeSpanTradeHistoryParams::default()).await,
            Err(ExchangeError::Unsupported { .. })
        ));
        assert!(matches!(svc.get_open_orders().await, Err(ExchangeError::Unsupported { .. })));
        assert_eq!(mock.call_count(), 0);
    }
}
