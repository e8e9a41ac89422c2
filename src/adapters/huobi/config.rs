//! Huobi Configuration
//!
//! Configuration for the Huobi coin-margined contract service.

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::types::Credentials;
use crate::config::HuobiSettings;

pub const DEFAULT_BASE_URL: &str = "https://api.hbdm.com";
pub const DEFAULT_CONTRACT_TYPE: &str = "quarter";
pub const DEFAULT_LEVER_RATE: u32 = 5;

#[derive(Clone)]
pub struct HuobiConfig {
    pub api_key: String,
    pub secret_key: String,
    pub base_url: String,
    /// `this_week`, `next_week`, `quarter` or `next_quarter`
    pub contract_type: String,
    pub lever_rate: u32,
}

impl HuobiConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> ExchangeResult<Self> {
        let api_key = std::env::var("HUOBI_API_KEY")
            .map_err(|_| ExchangeError::invalid("HUOBI_API_KEY not set"))?;
        if api_key.is_empty() {
            return Err(ExchangeError::invalid("HUOBI_API_KEY is empty"));
        }

        let secret_key = std::env::var("HUOBI_SECRET_KEY")
            .map_err(|_| ExchangeError::invalid("HUOBI_SECRET_KEY not set"))?;
        if secret_key.is_empty() {
            return Err(ExchangeError::invalid("HUOBI_SECRET_KEY is empty"));
        }

        Ok(Self {
            api_key,
            secret_key,
            ..Default::default()
        })
    }

    pub fn with_settings(mut self, settings: &HuobiSettings) -> Self {
        self.base_url = settings.base_url.clone();
        self.contract_type = settings.contract_type.clone();
        self.lever_rate = settings.lever_rate;
        self
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.api_key.clone(), self.secret_key.clone())
    }

    /// Host part of the base URL, as used in the signature payload
    pub fn host(&self) -> &str {
        let without_scheme = self
            .base_url
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.base_url);
        without_scheme
            .split('/')
            .next()
            .unwrap_or(without_scheme)
    }
}

impl Default for HuobiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            secret_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            contract_type: DEFAULT_CONTRACT_TYPE.to_string(),
            lever_rate: DEFAULT_LEVER_RATE,
        }
    }
}

impl std::fmt::Debug for HuobiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuobiConfig")
            .field("api_key", &self.api_key)
            .field("secret_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("contract_type", &self.contract_type)
            .field("lever_rate", &self.lever_rate)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_huobi_config_default() {
        let config = HuobiConfig::default();
        assert_eq!(config.base_url, "https://api.hbdm.com");
        assert_eq!(config.contract_type, "quarter");
        assert_eq!(config.lever_rate, 5);
    }

    #[test]
    fn test_host_extraction() {
        let config = HuobiConfig::default();
        assert_eq!(config.host(), "api.hbdm.com");

        let config = HuobiConfig {
            base_url: "http://127.0.0.1:8080/".into(),
            ..Default::default()
        };
        assert_eq!(config.host(), "127.0.0.1:8080");
    }

    #[test]
    #[serial]
    fn test_from_env_requires_key() {
        std::env::remove_var("HUOBI_API_KEY");
        std::env::set_var("HUOBI_SECRET_KEY", "secret");
        let err = HuobiConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("HUOBI_API_KEY"));

        std::env::set_var("HUOBI_API_KEY", "key");
        assert!(HuobiConfig::from_env().is_ok());

        std::env::remove_var("HUOBI_API_KEY");
        std::env::remove_var("HUOBI_SECRET_KEY");
    }
}
