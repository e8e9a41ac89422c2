//! Huobi error adaptation

use super::types::HuobiResult;
use crate::adapters::errors::{CommonError, CommonErrorKind};

pub fn classify(code: i64) -> CommonErrorKind {
    match code {
        1032 => CommonErrorKind::RateLimited,
        1047 | 1048 => CommonErrorKind::InsufficientFunds,
        1017 | 1061 => CommonErrorKind::NotFound,
        1010 | 1012 => CommonErrorKind::Unauthorized,
        1013 | 1030 | 1066 | 1067 | 1068 => CommonErrorKind::InvalidParameter,
        1000 | 1001 | 1004 => CommonErrorKind::Unavailable,
        _ => CommonErrorKind::Unknown,
    }
}

/// Adapt an `error` envelope
pub fn adapt(result: &HuobiResult) -> CommonError {
    let code = result.error_code();
    let message = result.err_msg.clone().unwrap_or_default();
    CommonError::new(classify(code), code, message)
}

/// Adapt a non-2xx HTTP status without a usable envelope
pub fn adapt_status(status: u16) -> CommonError {
    let kind = match status {
        401 | 403 => CommonErrorKind::Unauthorized,
        429 => CommonErrorKind::RateLimited,
        500..=599 => CommonErrorKind::Unavailable,
        _ => CommonErrorKind::Unknown,
    };
    CommonError::new(kind, i64::from(status), format!("HTTP {}", status))
}
