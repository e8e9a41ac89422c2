//! REST transport seam
//!
//! Services build a fully signed `RestRequest` and hand it to a
//! `RestTransport`. Non-2xx responses come back as ordinary `RestResponse`
//! values; only network-level failures are `TransportError`s.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::adapters::errors::{TransportError, TransportResult};
use crate::adapters::signing::build_query_string;

/// Default request timeout (milliseconds)
pub const HTTP_TIMEOUT_MS: u64 = 3_000;
/// Connect timeout (milliseconds)
pub const HTTP_CONNECT_TIMEOUT_MS: u64 = 1_000;
pub const HTTP_POOL_MAX_IDLE: usize = 4;
pub const HTTP_POOL_IDLE_TIMEOUT_SECS: u64 = 90;
pub const HTTP_TCP_KEEPALIVE_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request ready to be sent; query order is preserved on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestRequest {
    pub method: HttpMethod,
    pub base_url: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    /// JSON body
    pub body: Option<String>,
}

impl RestRequest {
    pub fn new(method: HttpMethod, base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method,
            base_url: base_url.into(),
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn query_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn json_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn query_string(&self) -> String {
        build_query_string(&self.query)
    }

    /// First query value for `key`
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.query.is_empty() {
            format!("{}{}", base, self.path)
        } else {
            format!("{}{}?{}", base, self.path, self.query_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestResponse {
    pub status: u16,
    pub body: String,
}

impl RestResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one HTTP exchange
#[async_trait]
pub trait RestTransport: Send + Sync {
    async fn execute(&self, request: RestRequest) -> TransportResult<RestResponse>;
}

#[async_trait]
impl<T: RestTransport + ?Sized> RestTransport for std::sync::Arc<T> {
    async fn execute(&self, request: RestRequest) -> TransportResult<RestResponse> {
        (**self).execute(request).await
    }
}

// =============================================================================
// reqwest implementation
// =============================================================================

/// Create a pooled HTTP client tuned for low-latency REST calls
pub fn create_http_client(exchange_name: &str, timeout_ms: u64) -> reqwest::Client {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .pool_max_idle_per_host(HTTP_POOL_MAX_IDLE)
        .pool_idle_timeout(Duration::from_secs(HTTP_POOL_IDLE_TIMEOUT_SECS))
        .tcp_keepalive(Duration::from_secs(HTTP_TCP_KEEPALIVE_SECS))
        .connect_timeout(Duration::from_millis(HTTP_CONNECT_TIMEOUT_MS.min(timeout_ms)))
        .tcp_nodelay(true)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new());
    tracing::info!(
        phase = "init",
        exchange = %exchange_name,
        timeout_ms = timeout_ms,
        connect_timeout_ms = HTTP_CONNECT_TIMEOUT_MS.min(timeout_ms),
        pool_max_idle = HTTP_POOL_MAX_IDLE,
        tcp_nodelay = true,
        "HTTP client configured"
    );
    client
}

/// `RestTransport` over a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout_ms: u64,
}

impl HttpTransport {
    pub fn new(exchange_name: &str, timeout_ms: u64) -> Self {
        Self {
            client: create_http_client(exchange_name, timeout_ms),
            timeout_ms,
        }
    }

    pub fn with_client(client: reqwest::Client, timeout_ms: u64) -> Self {
        Self { client, timeout_ms }
    }

    fn map_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout_ms)
        } else if err.is_connect() {
            TransportError::Connection(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

#[async_trait]
impl RestTransport for HttpTransport {
    async fn execute(&self, request: RestRequest) -> TransportResult<RestResponse> {
        let url = request.url();
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder
                .header("Content-Type", "application/json")
                .body(body);
        }

        let response = builder.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.map_error(e))?;

        tracing::trace!(method = %request.method, path = %request.path, status, "HTTP response");
        Ok(RestResponse { status, body })
    }
}
