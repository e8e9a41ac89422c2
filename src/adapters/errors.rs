//! Exchange adapter error types
//!
//! Every failure surfaced by a trade or market-data service is one of four
//! kinds: a caller error detected before any I/O, an exchange fault already
//! mapped through an exchange's error adapter, an operation the exchange does
//! not offer, or a transport failure propagated as-is.

use std::fmt;

use thiserror::Error;

/// Common classification of exchange-reported faults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommonErrorKind {
    RateLimited,
    InsufficientFunds,
    InvalidParameter,
    NotFound,
    Unauthorized,
    Unavailable,
    Unknown,
}

impl fmt::Display for CommonErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommonErrorKind::RateLimited => "rate limited",
            CommonErrorKind::InsufficientFunds => "insufficient funds",
            CommonErrorKind::InvalidParameter => "invalid parameter",
            CommonErrorKind::NotFound => "not found",
            CommonErrorKind::Unauthorized => "unauthorized",
            CommonErrorKind::Unavailable => "unavailable",
            CommonErrorKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// An exchange fault after adaptation
///
/// Keeps the exchange's original code and message for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonError {
    pub kind: CommonErrorKind,
    pub code: i64,
    pub message: String,
}

impl CommonError {
    pub fn new(kind: CommonErrorKind, code: i64, message: impl Into<String>) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CommonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {}): {}", self.kind, self.code, self.message)
    }
}

/// Failures raised by the transport collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection could not be established or was dropped
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Network operation timed out
    #[error("Network timeout after {0}ms")]
    Timeout(u64),

    /// Request could not be built or sent
    #[error("Request failed: {0}")]
    Request(String),
}

/// Errors returned by exchange services
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// Caller supplied malformed or insufficient parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Exchange rejected the request
    #[error("Exchange fault: {0}")]
    Exchange(CommonError),

    /// Operation not offered by this exchange
    #[error("{operation} is not supported by {exchange}")]
    Unsupported {
        exchange: &'static str,
        operation: &'static str,
    },

    /// Network failure beneath the service
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    /// Successful response whose payload could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ExchangeError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        ExchangeError::InvalidParameter(msg.into())
    }

    pub fn unsupported(exchange: &'static str, operation: &'static str) -> Self {
        ExchangeError::Unsupported {
            exchange,
            operation,
        }
    }

    /// True when the failure was detected locally, before any network call
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            ExchangeError::InvalidParameter(_) | ExchangeError::Unsupported { .. }
        )
    }

    /// True for timeouts and dropped connections
    pub fn is_retryable_transport(&self) -> bool {
        matches!(
            self,
            ExchangeError::Transport(TransportError::Timeout(_))
                | ExchangeError::Transport(TransportError::Connection(_))
        )
    }

    /// The adapted fault, if the exchange reported one
    pub fn common(&self) -> Option<&CommonError> {
        match self {
            ExchangeError::Exchange(e) => Some(e),
            _ => None,
        }
    }

    pub fn kind(&self) -> Option<CommonErrorKind> {
        self.common().map(|e| e.kind)
    }
}

impl From<CommonError> for ExchangeError {
    fn from(err: CommonError) -> Self {
        ExchangeError::Exchange(err)
    }
}

/// Result type alias for exchange operations
pub type ExchangeResult<T> = std::result::Result<T, ExchangeError>;

/// Result type alias for transport calls
pub type TransportResult<T> = std::result::Result<T, TransportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = ExchangeError::invalid("currency pair required");
        assert_eq!(err.to_string(), "Invalid parameter: currency pair required");
        assert!(err.is_caller_error());
    }

    #[test]
    fn test_unsupported_display() {
        let err = ExchangeError::unsupported("binance", "cancel_order_by_id");
        assert_eq!(err.to_string(), "cancel_order_by_id is not supported by binance");
        assert!(err.is_caller_error());
    }

    #[test]
    fn test_exchange_fault_keeps_original_code() {
        let err: ExchangeError =
            CommonError::new(CommonErrorKind::NotFound, -2013, "Order does not exist.").into();
        assert_eq!(err.kind(), Some(CommonErrorKind::NotFound));
        assert_eq!(err.common().map(|c| c.code), Some(-2013));
        assert!(err.to_string().contains("Order does not exist."));
        assert!(!err.is_caller_error());
    }

    #[test]
    fn test_transport_error_converts() {
        let err: ExchangeError = TransportError::Timeout(3000).into();
        assert_eq!(err.to_string(), "Transport failure: Network timeout after 3000ms");
        assert_eq!(err.kind(), None);
        assert!(err.is_retryable_transport());

        let err: ExchangeError = TransportError::Request("bad header".into()).into();
        assert!(!err.is_retryable_transport());
    }
}
