//! Binance Configuration
//!
//! Endpoints, default identity and receive window for the Binance services.

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::types::Credentials;
use crate::config::BinanceSettings;

pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";
pub const DEFAULT_FUTURES_BASE_URL: &str = "https://fapi.binance.com";

/// Configuration for the Binance trade and market-data services
///
/// The receive window is carried here explicitly; nothing is read from
/// ambient state at request time.
#[derive(Clone)]
pub struct BinanceConfig {
    pub api_key: String,
    pub secret_key: String,
    /// Spot REST base URL
    pub base_url: String,
    /// USD-M futures REST base URL
    pub futures_base_url: String,
    /// `recvWindow` in milliseconds, omitted from requests when `None`
    pub recv_window_ms: Option<u64>,
}

impl BinanceConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> ExchangeResult<Self> {
        let api_key = std::env::var("BINANCE_API_KEY")
            .map_err(|_| ExchangeError::invalid("BINANCE_API_KEY not set"))?;
        if api_key.is_empty() {
            return Err(ExchangeError::invalid("BINANCE_API_KEY is empty"));
        }

        let secret_key = std::env::var("BINANCE_SECRET_KEY")
            .map_err(|_| ExchangeError::invalid("BINANCE_SECRET_KEY not set"))?;
        if secret_key.is_empty() {
            return Err(ExchangeError::invalid("BINANCE_SECRET_KEY is empty"));
        }

        Ok(Self {
            api_key,
            secret_key,
            ..Default::default()
        })
    }

    /// Apply endpoint settings loaded from the YAML config
    pub fn with_settings(mut self, settings: &BinanceSettings) -> Self {
        self.base_url = settings.base_url.clone();
        self.futures_base_url = settings.futures_base_url.clone();
        self.recv_window_ms = settings.recv_window_ms;
        self
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.api_key.clone(), self.secret_key.clone())
    }
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            secret_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            futures_base_url: DEFAULT_FUTURES_BASE_URL.to_string(),
            recv_window_ms: None,
        }
    }
}

impl std::fmt::Debug for BinanceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceConfig")
            .field("api_key", &self.api_key)
            .field("secret_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("futures_base_url", &self.futures_base_url)
            .field("recv_window_ms", &self.recv_window_ms)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_binance_config_default() {
        let config = BinanceConfig::default();
        assert!(config.api_key.is_empty());
        assert_eq!(config.base_url, "https://api.binance.com");
        assert_eq!(config.futures_base_url, "https://fapi.binance.com");
        assert_eq!(config.recv_window_ms, None);
    }

    #[test]
    fn test_binance_config_debug_hides_secret() {
        let config = BinanceConfig {
            api_key: "pub".into(),
            secret_key: "hidden-secret".into(),
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hidden-secret"));
    }

    #[test]
    fn test_with_settings_applies_recv_window() {
        let settings = BinanceSettings {
            base_url: "http://localhost:1234".into(),
            futures_base_url: "http://localhost:5678".into(),
            recv_window_ms: Some(5000),
        };
        let config = BinanceConfig::default().with_settings(&settings);
        assert_eq!(config.base_url, "http://localhost:1234");
        assert_eq!(config.recv_window_ms, Some(5000));
    }

    #[test]
    #[serial]
    fn test_from_env_requires_secret() {
        std::env::set_var("BINANCE_API_KEY", "key");
        std::env::remove_var("BINANCE_SECRET_KEY");
        let err = BinanceConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("BINANCE_SECRET_KEY"));

        std::env::set_var("BINANCE_SECRET_KEY", "secret");
        let config = BinanceConfig::from_env().unwrap();
        assert_eq!(config.credentials().api_key(), "key");

        std::env::remove_var("BINANCE_API_KEY");
        std::env::remove_var("BINANCE_SECRET_KEY");
    }
}
