//! Request signing
//!
//! HMAC-SHA256 signature providers. Binance signs the raw query string and
//! expects lowercase hex; Huobi signs a canonical request description and
//! expects base64.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::adapters::errors::{ExchangeError, ExchangeResult};

type HmacSha256 = Hmac<Sha256>;

/// Produces a deterministic digest of a canonical message under a secret
///
/// Implementations hold no credentials; the secret is passed per call so a
/// caller-supplied override never touches client-wide state.
pub trait SignatureProvider: Send + Sync {
    /// Sign `message` with `secret`
    fn sign(&self, secret: &str, message: &str) -> ExchangeResult<String>;

    /// Constant-time check of an encoded signature
    fn verify(&self, secret: &str, message: &str, signature: &str) -> bool;
}

fn mac_for(secret: &str, message: &str) -> ExchangeResult<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ExchangeError::invalid(format!("unusable signing secret: {}", e)))?;
    mac.update(message.as_bytes());
    Ok(mac)
}

fn verify_bytes(secret: &str, message: &str, expected: &[u8]) -> bool {
    match mac_for(secret, message) {
        Ok(mac) => mac.verify_slice(expected).is_ok(),
        Err(_) => false,
    }
}

/// Lowercase hex HMAC-SHA256
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha256Hex;

impl SignatureProvider for HmacSha256Hex {
    fn sign(&self, secret: &str, message: &str) -> ExchangeResult<String> {
        let mac = mac_for(secret, message)?;
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    fn verify(&self, secret: &str, message: &str, signature: &str) -> bool {
        match hex::decode(signature) {
            Ok(bytes) => verify_bytes(secret, message, &bytes),
            Err(_) => false,
        }
    }
}

/// Standard base64 HMAC-SHA256
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha256Base64;

impl SignatureProvider for HmacSha256Base64 {
    fn sign(&self, secret: &str, message: &str) -> ExchangeResult<String> {
        let mac = mac_for(secret, message)?;
        Ok(BASE64.encode(mac.finalize().into_bytes()))
    }

    fn verify(&self, secret: &str, message: &str, signature: &str) -> bool {
        match BASE64.decode(signature) {
            Ok(bytes) => verify_bytes(secret, message, &bytes),
            Err(_) => false,
        }
    }
}

/// Join key/value pairs into a URL-encoded query string, preserving order
pub fn build_query_string(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
