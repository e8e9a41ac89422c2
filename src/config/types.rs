//! Configuration types for exchange endpoints and transport
//!
//! Loaded from YAML. Every section is optional and falls back to the
//! production endpoints; credentials are read from the environment by the
//! exchange configs and never appear here.

use serde::{Deserialize, Serialize};

use crate::adapters::{binance, huobi};
use crate::adapters::shared::RetryConfig;
use crate::adapters::transport::HTTP_TIMEOUT_MS;
use crate::error::AppError;

/// Upper bound Binance accepts for `recvWindow`
pub const MAX_RECV_WINDOW_MS: u64 = 60_000;
/// Highest lever rate offered on Huobi contracts
pub const MAX_LEVER_RATE: u32 = 125;

// ============================================================================
// Serde defaults
// ============================================================================

fn default_binance_base_url() -> String {
    binance::DEFAULT_BASE_URL.to_string()
}

fn default_binance_futures_base_url() -> String {
    binance::DEFAULT_FUTURES_BASE_URL.to_string()
}

fn default_huobi_base_url() -> String {
    huobi::DEFAULT_BASE_URL.to_string()
}

fn default_contract_type() -> String {
    huobi::DEFAULT_CONTRACT_TYPE.to_string()
}

fn default_lever_rate() -> u32 {
    huobi::DEFAULT_LEVER_RATE
}

fn default_timeout_ms() -> u64 {
    HTTP_TIMEOUT_MS
}

fn default_max_attempts() -> u32 {
    RetryConfig::default().max_attempts
}

fn default_initial_delay_ms() -> u64 {
    RetryConfig::default().initial_delay_ms
}

fn default_max_delay_ms() -> u64 {
    RetryConfig::default().max_delay_ms
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Binance endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BinanceSettings {
    /// Spot REST root
    #[serde(default = "default_binance_base_url")]
    pub base_url: String,
    /// USD-M futures REST root (market data)
    #[serde(default = "default_binance_futures_base_url")]
    pub futures_base_url: String,
    /// Receive window sent with every signed call; exchange default when absent
    #[serde(default)]
    pub recv_window_ms: Option<u64>,
}

/// Huobi contract endpoint and order defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HuobiSettings {
    #[serde(default = "default_huobi_base_url")]
    pub base_url: String,
    /// `this_week`, `next_week`, `quarter` or `next_quarter`
    #[serde(default = "default_contract_type")]
    pub contract_type: String,
    #[serde(default = "default_lever_rate")]
    pub lever_rate: u32,
}

/// HTTP timeout and retry policy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransportSettings {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl TransportSettings {
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.max_attempts,
            initial_delay_ms: self.initial_delay_ms,
            max_delay_ms: self.max_delay_ms,
        }
    }
}

/// Root application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub binance: BinanceSettings,
    #[serde(default)]
    pub huobi: HuobiSettings,
    #[serde(default)]
    pub transport: TransportSettings,
}

impl AppConfig {
    /// Validate all configuration rules
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(window) = self.binance.recv_window_ms {
            if window == 0 || window > MAX_RECV_WINDOW_MS {
                return Err(AppError::Config(format!(
                    "binance.recv_window_ms must be 1-{}, got {}",
                    MAX_RECV_WINDOW_MS, window
                )));
            }
        }

        for (name, url) in [
            ("binance.base_url", &self.binance.base_url),
            ("binance.futures_base_url", &self.binance.futures_base_url),
            ("huobi.base_url", &self.huobi.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AppError::Config(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }

        if self.huobi.lever_rate < 1 || self.huobi.lever_rate > MAX_LEVER_RATE {
            return Err(AppError::Config(format!(
                "huobi.lever_rate must be 1-{}, got {}",
                MAX_LEVER_RATE, self.huobi.lever_rate
            )));
        }

        if self.huobi.contract_type.trim().is_empty() {
            return Err(AppError::Config(
                "huobi.contract_type cannot be empty".to_string(),
            ));
        }

        if self.transport.max_attempts < 1 {
            return Err(AppError::Config(
                "transport.max_attempts must be at least 1".to_string(),
            ));
        }

        if self.transport.max_delay_ms < self.transport.initial_delay_ms {
            return Err(AppError::Config(format!(
                "transport.max_delay_ms ({}) must be >= initial_delay_ms ({})",
                self.transport.max_delay_ms, self.transport.initial_delay_ms
            )));
        }

        Ok(())
    }
}

impl Default for BinanceSettings {
    fn default() -> Self {
        Self {
            base_url: default_binance_base_url(),
            futures_base_url: default_binance_futures_base_url(),
            recv_window_ms: None,
        }
    }
}

impl Default for HuobiSettings {
    fn default() -> Self {
        Self {
            base_url: default_huobi_base_url(),
            contract_type: default_contract_type(),
            lever_rate: default_lever_rate(),
        }
    }
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.binance.base_url, "https://api.binance.com");
        assert_eq!(config.huobi.lever_rate, 5);
        assert_eq!(config.transport.retry_config(), RetryConfig::default());
    }

    #[test]
    fn test_recv_window_bounds() {
        let mut config = AppConfig::default();
        config.binance.recv_window_ms = Some(0);
        assert!(config.validate().is_err());

        config.binance.recv_window_ms = Some(60_001);
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("recv_window_ms"), "Got: {}", err);

        config.binance.recv_window_ms = Some(5_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lever_rate_bounds() {
        let mut config = AppConfig::default();
        config.huobi.lever_rate = 0;
        assert!(config.validate().is_err());

        config.huobi.lever_rate = 126;
        assert!(config
            .validate()
            .unwrap_err()
            .to_string()
            .contains("lever_rate must be 1-125"));
    }

    #[test]
    fn test_retry_policy_rules() {
        let mut config = AppConfig::default();
        config.transport.max_attempts = 0;
        assert!(config.validate().is_err());

        config.transport.max_attempts = 2;
        config.transport.initial_delay_ms = 1_000;
        config.transport.max_delay_ms = 500;
        assert!(config
            .validate()
            .unwrap_err()
            .to_string()
            .contains("max_delay_ms"));
    }

    #[test]
    fn test_base_url_must_be_http() {
        let mut config = AppConfig::default();
        config.huobi.base_url = "api.hbdm.com".to_string();
        assert!(config.validate().unwrap_err().to_string().contains("huobi.base_url"));
    }
}
