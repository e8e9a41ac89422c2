//! Binance raw signed calls
//!
//! One method per spot endpoint. Each call signs its query string with the
//! configured identity, or with a per-call override when one is given, and
//! decodes the reply. Non-2xx replies go through the error adapter.

use serde::de::{DeserializeOwned, IgnoredAny};

use super::config::BinanceConfig;
use super::error_adapter;
use super::translator::WireOrderParams;
use super::types::{BinanceCancelledOrder, BinanceNewOrder, BinanceOrder, BinanceTrade};
use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::signing::{build_query_string, HmacSha256Hex, SignatureProvider};
use crate::adapters::transport::{HttpMethod, RestRequest, RestTransport};
use crate::adapters::types::{current_time_ms, Credentials};

pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

pub const ORDER_PATH: &str = "/api/v3/order";
pub const ORDER_TEST_PATH: &str = "/api/v3/order/test";
pub const OPEN_ORDERS_PATH: &str = "/api/v3/openOrders";
pub const MY_TRADES_PATH: &str = "/api/v3/myTrades";

/// Send a request and decode a 2xx JSON body
pub(crate) async fn execute_json<T, R>(transport: &R, request: RestRequest) -> ExchangeResult<T>
where
    T: DeserializeOwned,
    R: RestTransport + ?Sized,
{
    let method = request.method;
    let path = request.path.clone();
    tracing::debug!(exchange = "binance", method = %method, path = %path, "Sending request");

    let response = transport.execute(request).await?;
    if !response.is_success() {
        let err = error_adapter::adapt_response(&response);
        tracing::warn!(
            exchange = "binance",
            path = %path,
            status = response.status,
            code = err.code,
            kind = %err.kind,
            message = %err.message,
            "Request rejected by exchange"
        );
        return Err(err.into());
    }

    serde_json::from_str(&response.body).map_err(|e| {
        ExchangeError::InvalidResponse(format!("{} {}: {}", method, path, e))
    })
}

/// Filters for `GET /api/v3/myTrades`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeListQuery {
    pub symbol: String,
    pub limit: Option<u32>,
    pub from_id: Option<i64>,
    /// Epoch milliseconds
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
}

/// Signed Binance spot endpoints
#[derive(Debug)]
pub struct BinanceTradeServiceRaw<T> {
    config: BinanceConfig,
    transport: T,
    signer: HmacSha256Hex,
}

impl<T: RestTransport> BinanceTradeServiceRaw<T> {
    pub fn new(config: BinanceConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            signer: HmacSha256Hex,
        }
    }

    pub fn config(&self) -> &BinanceConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Append `recvWindow`, `timestamp` and `signature` and attach the API key
    pub fn signed_request(
        &self,
        method: HttpMethod,
        path: &str,
        mut query: Vec<(String, String)>,
        credentials: Option<&Credentials>,
    ) -> ExchangeResult<RestRequest> {
        let configured;
        let credentials = match credentials {
            Some(c) => c,
            None => {
                configured = self.config.credentials();
                &configured
            }
        };
        if credentials.api_key().is_empty() || credentials.secret_key().is_empty() {
            return Err(ExchangeError::invalid("Binance API credentials are not configured"));
        }

        if let Some(window) = self.config.recv_window_ms {
            query.push(("recvWindow".to_string(), window.to_string()));
        }
        query.push(("timestamp".to_string(), current_time_ms().to_string()));
        let signature = self
            .signer
            .sign(credentials.secret_key(), &build_query_string(&query))?;
        query.push(("signature".to_string(), signature));

        let mut request = RestRequest::new(method, self.config.base_url.as_str(), path)
            .header(API_KEY_HEADER, credentials.api_key());
        request.query = query;
        Ok(request)
    }

    /// `POST /api/v3/order`
    pub async fn new_order(
        &self,
        params: &WireOrderParams,
        credentials: Option<&Credentials>,
    ) -> ExchangeResult<BinanceNewOrder> {
        let request = self.signed_request(HttpMethod::Post, ORDER_PATH, params.to_query(), credentials)?;
        execute_json(&self.transport, request).await
    }

    /// `POST /api/v3/order/test`, validated by the exchange but never booked
    pub async fn test_new_order(
        &self,
        params: &WireOrderParams,
        credentials: Option<&Credentials>,
    ) -> ExchangeResult<()> {
        let request =
            self.signed_request(HttpMethod::Post, ORDER_TEST_PATH, params.to_query(), credentials)?;
        let _: IgnoredAny = execute_json(&self.transport, request).await?;
        Ok(())
    }

    /// `DELETE /api/v3/order`
    pub async fn cancel_order(
        &self,
        symbol: &str,
        order_id: i64,
        credentials: Option<&Credentials>,
    ) -> ExchangeResult<BinanceCancelledOrder> {
        let query = vec![
            ("symbol".to_string(), symbol.to_string()),
            ("orderId".to_string(), order_id.to_string()),
        ];
        let request = self.signed_request(HttpMethod::Delete, ORDER_PATH, query, credentials)?;
        execute_json(&self.transport, request).await
    }

    /// `GET /api/v3/openOrders`, across all symbols when `symbol` is `None`
    pub async fn open_orders(
        &self,
        symbol: Option<&str>,
        credentials: Option<&Credentials>,
    ) -> ExchangeResult<Vec<BinanceOrder>> {
        let query = symbol
            .map(|s| vec![("symbol".to_string(), s.to_string())])
            .unwrap_or_default();
        let request = self.signed_request(HttpMethod::Get, OPEN_ORDERS_PATH, query, credentials)?;
        execute_json(&self.transport, request).await
    }

    /// `GET /api/v3/myTrades`
    pub async fn trade_list(
        &self,
        filter: &TradeListQuery,
        credentials: Option<&Credentials>,
    ) -> ExchangeResult<Vec<BinanceTrade>> {
        let mut query = vec![("symbol".to_string(), filter.symbol.clone())];
        if let Some(limit) = filter.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(start) = filter.start_time {
            query.push(("startTime".to_string(), start.to_string()));
        }
        if let Some(end) = filter.end_time {
            query.push(("endTime".to_string(), end.to_string()));
        }
        if let Some(from_id) = filter.from_id {
            query.push(("fromId".to_string(), from_id.to_string()));
        }
        let request = self.signed_request(HttpMethod::Get, MY_TRADES_PATH, query, credentials)?;
        execute_json(&self.transport, request).await
    }

    /// `GET /api/v3/order`
    pub async fn order_status(
        &self,
        symbol: &str,
        order_id: i64,
        credentials: Option<&Credentials>,
    ) -> ExchangeResult<BinanceOrder> {
        let query = vec![
            ("symbol".to_string(), symbol.to_string()),
            ("orderId".to_string(), order_id.to_string()),
        ];
        let request = self.signed_request(HttpMethod::Get, ORDER_PATH, query, credentials)?;
        execute_json(&self.transport, request).await
    }
}
