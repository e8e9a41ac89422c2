//! Binance error adaptation
//!
//! Static lookup from Binance error codes to common error kinds. Bodies that
//! are not Binance error payloads are classified by HTTP status.

use super::types::BinanceApiError;
use crate::adapters::errors::{CommonError, CommonErrorKind};
use crate::adapters::transport::RestResponse;

/// Kind for a Binance error code
///
/// `-2010` (new order rejected) is split on its message: insufficient
/// balance is a funds problem, any other rejection is a parameter problem.
pub fn classify(code: i64, message: &str) -> CommonErrorKind {
    match code {
        -1000 => CommonErrorKind::Unknown,
        -1001 | -1006 | -1007 | -1016 => CommonErrorKind::Unavailable,
        -1002 | -1022 | -2014 | -2015 => CommonErrorKind::Unauthorized,
        -1003 | -1015 => CommonErrorKind::RateLimited,
        -1013 | -1021 => CommonErrorKind::InvalidParameter,
        -1130..=-1100 => CommonErrorKind::InvalidParameter,
        -2010 => {
            if message.to_lowercase().contains("insufficient balance") {
                CommonErrorKind::InsufficientFunds
            } else {
                CommonErrorKind::InvalidParameter
            }
        }
        -2011 | -2013 => CommonErrorKind::NotFound,
        -2018 | -2019 => CommonErrorKind::InsufficientFunds,
        _ => CommonErrorKind::Unknown,
    }
}

pub fn adapt(code: i64, message: &str) -> CommonError {
    CommonError::new(classify(code, message), code, message)
}

/// Kind for a failed response without a Binance error payload
pub fn classify_status(status: u16) -> CommonErrorKind {
    match status {
        418 | 429 => CommonErrorKind::RateLimited,
        401 | 403 => CommonErrorKind::Unauthorized,
        500..=599 => CommonErrorKind::Unavailable,
        _ => CommonErrorKind::Unknown,
    }
}

/// Adapt a non-2xx response
pub fn adapt_response(response: &RestResponse) -> CommonError {
    match serde_json::from_str::<BinanceApiError>(&response.body) {
        Ok(err) => adapt(err.code, &err.msg),
        Err(_) => CommonError::new(
            classify_status(response.status),
            i64::from(response.status),
            format!("HTTP {}", response.status),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &[(i64, CommonErrorKind)] = &[
        (-1000, CommonErrorKind::Unknown),
        (-1001, CommonErrorKind::Unavailable),
        (-1006, CommonErrorKind::Unavailable),
        (-1007, CommonErrorKind::Unavailable),
        (-1016, CommonErrorKind::Unavailable),
        (-1002, CommonErrorKind::Unauthorized),
        (-1022, CommonErrorKind::Unauthorized),
        (-2014, CommonErrorKind::Unauthorized),
        (-2015, CommonErrorKind::Unauthorized),
        (-1003, CommonErrorKind::RateLimited),
        (-1015, CommonErrorKind::RateLimited),
        (-1013, CommonErrorKind::InvalidParameter),
        (-1021, CommonErrorKind::InvalidParameter),
        (-1100, CommonErrorKind::InvalidParameter),
        (-1121, CommonErrorKind::InvalidParameter),
        (-1130, CommonErrorKind::InvalidParameter),
        (-2011, CommonErrorKind::NotFound),
        (-2013, CommonErrorKind::NotFound),
        (-2018, CommonErrorKind::InsufficientFunds),
        (-2019, CommonErrorKind::InsufficientFunds),
    ];

    #[test]
    fn test_every_table_code_maps() {
        for (code, kind) in TABLE {
            assert_eq!(classify(*code, ""), *kind, "code {}", code);
        }
    }

    #[test]
    fn test_unmapped_codes_are_unknown() {
        for code in [0, 1, -1099, -1131, -9999, i64::MIN, i64::MAX] {
            assert_eq!(classify(code, "whatever"), CommonErrorKind::Unknown);
        }
    }

    #[test]
    fn test_new_order_rejected_split_by_message() {
        assert_eq!(
            classify(-2010, "Account has insufficient balance for requested action."),
            CommonErrorKind::InsufficientFunds
        );
        assert_eq!(
            classify(-2010, "Order would immediately match and take."),
            CommonErrorKind::InvalidParameter
        );
    }

    #[test]
    fn test_adapt_keeps_code_and_message() {
        let err = adapt(-2013, "Order does not exist.");
        assert_eq!(err.kind, CommonErrorKind::NotFound);
        assert_eq!(err.code, -2013);
        assert_eq!(err.message, "Order does not exist.");
    }

    #[test]
    fn test_adapt_response_with_payload() {
        let resp = RestResponse::new(400, r#"{"code":-1121,"msg":"Invalid symbol."}"#);
        let err = adapt_response(&resp);
        assert_eq!(err.kind, CommonErrorKind::InvalidParameter);
        assert_eq!(err.code, -1121);
    }

    #[test]
    fn test_adapt_response_without_payload() {
        let cases = [
            (429, CommonErrorKind::RateLimited),
            (418, CommonErrorKind::RateLimited),
            (401, CommonErrorKind::Unauthorized),
            (403, CommonErrorKind::Unauthorized),
            (502, CommonErrorKind::Unavailable),
            (404, CommonErrorKind::Unknown),
        ];
        for (status, kind) in cases {
            let err = adapt_response(&RestResponse::new(status, "<html>gateway</html>"));
            assert_eq!(err.kind, kind, "status {}", status);
            assert_eq!(err.code, i64::from(status));
            assert!(!err.message.contains("html"));
        }
    }
}
