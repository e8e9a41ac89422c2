//! Shared helpers for exchange services

pub mod retry;

pub use retry::{is_retryable_status, retry_with_backoff, should_retry, ResilientTransport, RetryConfig};
