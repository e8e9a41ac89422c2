//! Huobi Signing
//!
//! Signature version 2: base64 HMAC-SHA256 over
//! `METHOD\nhost\npath\nquery`, where the query holds the auth parameters
//! sorted by name and URL-encoded.

use chrono::{DateTime, Utc};

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::signing::{build_query_string, HmacSha256Base64, SignatureProvider};
use crate::adapters::transport::{HttpMethod, RestRequest};
use crate::adapters::types::Credentials;

pub const SIGNATURE_METHOD: &str = "HmacSHA256";
pub const SIGNATURE_VERSION: &str = "2";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Auth query parameters sorted by name, without the signature
pub fn auth_params(api_key: &str, timestamp: DateTime<Utc>) -> Vec<(String, String)> {
    let mut params = vec![
        ("AccessKeyId".to_string(), api_key.to_string()),
        ("SignatureMethod".to_string(), SIGNATURE_METHOD.to_string()),
        ("SignatureVersion".to_string(), SIGNATURE_VERSION.to_string()),
        ("Timestamp".to_string(), timestamp.format(TIMESTAMP_FORMAT).to_string()),
    ];
    params.sort_by(|a, b| a.0.cmp(&b.0));
    params
}

/// Canonical string the signature is computed over
pub fn canonical_payload(method: HttpMethod, host: &str, path: &str, sorted_query: &str) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        method.as_str(),
        host.to_lowercase(),
        path,
        sorted_query
    )
}

/// Build a signed request for `path` on `base_url`
pub fn signed_request(
    method: HttpMethod,
    base_url: &str,
    host: &str,
    path: &str,
    credentials: &Credentials,
    timestamp: DateTime<Utc>,
) -> ExchangeResult<RestRequest> {
    if credentials.api_key().is_empty() || credentials.secret_key().is_empty() {
        return Err(ExchangeError::invalid("Huobi API credentials are not configured"));
    }

    let mut query = auth_params(credentials.api_key(), timestamp);
    let payload = canonical_payload(method, host, path, &build_query_string(&query));
    let signature = HmacSha256Base64.sign(credentials.secret_key(), &payload)?;
    query.push(("Signature".to_string(), signature));

    let mut request = RestRequest::new(method, base_url, path);
    request.query = query;
    Ok(request)
}
