//! Retry wrapper with exponential backoff
//!
//! `ResilientTransport` sits beneath the trade services. It retries transport
//! failures and throttling/server-side HTTP statuses; it never looks at the
//! exchange's error payload, so an adapted exchange fault is never retried.
//!
//! Only GET requests are retried on timeouts and 5xx. A POST or DELETE may
//! already have executed when those come back, so it is re-sent only when
//! it provably never ran: throttled (418/429) or never connected.

use std::time::Duration;

use async_trait::async_trait;

use crate::adapters::errors::{TransportError, TransportResult};
use crate::adapters::transport::{HttpMethod, RestRequest, RestResponse, RestTransport};

/// Configuration for retry attempts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Initial delay in milliseconds (doubles each retry)
    pub initial_delay_ms: u64,
    /// Maximum delay cap in milliseconds
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 500,
            max_delay_ms: 5000,
        }
    }
}

impl RetryConfig {
    /// Delay before retry number `retry` (0-based), without jitter
    pub fn base_delay_ms(&self, retry: u32) -> u64 {
        let factor = 1u64.checked_shl(retry).unwrap_or(u64::MAX);
        self.initial_delay_ms
            .saturating_mul(factor)
            .min(self.max_delay_ms)
    }
}

/// HTTP statuses worth another attempt: 418/429 throttling and 5xx
pub fn is_retryable_status(status: u16) -> bool {
    status == 418 || status == 429 || (500..600).contains(&status)
}

/// Whether a `method` request ending in `outcome` may be sent again
pub fn should_retry(method: HttpMethod, outcome: &TransportResult<RestResponse>) -> bool {
    let idempotent = method == HttpMethod::Get;
    match outcome {
        Ok(resp) if idempotent => is_retryable_status(resp.status),
        Ok(resp) => resp.status == 418 || resp.status == 429,
        Err(TransportError::Connection(_)) => true,
        Err(TransportError::Timeout(_)) => idempotent,
        Err(TransportError::Request(_)) => false,
    }
}

/// Run `op` until it yields a non-retryable outcome or attempts run out
///
/// Sleeps `min(initial * 2^n, max)` plus 0-199ms jitter between attempts.
/// Returns the last outcome when every attempt was retryable.
pub async fn retry_with_backoff<F, Fut>(
    config: &RetryConfig,
    label: &str,
    method: HttpMethod,
    mut op: F,
) -> TransportResult<RestResponse>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = TransportResult<RestResponse>>,
{
    let attempts = config.max_attempts.max(1);
    let mut outcome = op().await;

    for retry in 0..attempts - 1 {
        if !should_retry(method, &outcome) {
            return outcome;
        }

        // Jitter against synchronized retries (0-199ms)
        let jitter = rand::random::<u64>() % 200;
        let backoff_ms = config.base_delay_ms(retry) + jitter;

        match &outcome {
            Ok(resp) => tracing::warn!(
                target_name = %label,
                attempt = retry + 2,
                max_attempts = attempts,
                status = resp.status,
                backoff_ms,
                "Retrying after HTTP status"
            ),
            Err(e) => tracing::warn!(
                target_name = %label,
                attempt = retry + 2,
                max_attempts = attempts,
                error = %e,
                backoff_ms,
                "Retrying after transport failure"
            ),
        }

        tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
        outcome = op().await;
    }

    outcome
}

/// Transport decorator adding retry with backoff
#[derive(Debug, Clone)]
pub struct ResilientTransport<T> {
    inner: T,
    config: RetryConfig,
    label: String,
}

impl<T: RestTransport> ResilientTransport<T> {
    pub fn new(inner: T, config: RetryConfig, label: impl Into<String>) -> Self {
        Self {
            inner,
            config,
            label: label.into(),
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: RestTransport> RestTransport for ResilientTransport<T> {
    async fn execute(&self, request: RestRequest) -> TransportResult<RestResponse> {
        let method = request.method;
        retry_with_backoff(&self.config, &self.label, method, || {
            self.inner.execute(request.clone())
        })
        .await
    }
}
