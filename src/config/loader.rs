//! Configuration loader for YAML files

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::AppError;

use super::types::AppConfig;

/// Load configuration from a YAML file
///
/// Missing sections take their defaults; the result is validated before it
/// is returned.
///
/// # Example
/// ```ignore
/// use std::path::Path;
/// use tradegate::config::load_config;
///
/// let config = load_config(Path::new("config.yaml"))?;
/// ```
pub fn load_config(path: &Path) -> Result<AppConfig, AppError> {
    if !path.exists() {
        return Err(AppError::Config(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let config: AppConfig = serde_yaml::from_reader(reader).map_err(|e| {
        AppError::Config(format!(
            "YAML parse error in '{}': {}",
            path.display(),
            e
        ))
    })?;

    config.validate()?;

    Ok(config)
}

/// Load configuration from a YAML string
pub fn load_config_from_str(yaml_content: &str) -> Result<AppConfig, AppError> {
    let config: AppConfig = serde_yaml::from_str(yaml_content).map_err(|e| {
        AppError::Config(format!("YAML parse error: {}", e))
    })?;

    config.validate()?;

    Ok(config)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VALID_CONFIG_YAML: &str = r#"
binance:
  base_url: https://testnet.binance.vision
  recv_window_ms: 5000
huobi:
  contract_type: this_week
  lever_rate: 20
transport:
  timeout_ms: 2500
  max_attempts: 4
  initial_delay_ms: 250
  max_delay_ms: 4000
"#;

    #[test]
    fn test_load_config_from_str_valid() {
        let config = load_config_from_str(VALID_CONFIG_YAML).unwrap();
        assert_eq!(config.binance.base_url, "https://testnet.binance.vision");
        assert_eq!(config.binance.futures_base_url, "https://fapi.binance.com");
        assert_eq!(config.binance.recv_window_ms, Some(5000));
        assert_eq!(config.huobi.contract_type, "this_week");
        assert_eq!(config.huobi.lever_rate, 20);
        assert_eq!(config.huobi.base_url, "https://api.hbdm.com");
        assert_eq!(config.transport.max_attempts, 4);
    }

    #[test]
    fn test_empty_sections_take_defaults() {
        let config = load_config_from_str("huobi: {}\n").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_config_from_str_invalid_yaml() {
        let result = load_config_from_str("invalid: yaml: content: [");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("YAML parse error"));
    }

    #[test]
    fn test_load_config_from_str_validation_failure() {
        let yaml = r#"
huobi:
  lever_rate: 200
"#;
        let result = load_config_from_str(yaml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("lever_rate"));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/path/config.yaml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Configuration file not found"));
    }

    #[test]
    fn test_load_config_from_file_valid() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(VALID_CONFIG_YAML.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.transport.timeout_ms, 2500);
        assert_eq!(config.transport.retry_config().initial_delay_ms, 250);
    }

    #[test]
    fn test_load_config_from_file_invalid_yaml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"invalid: [yaml: content").unwrap();
        temp_file.flush().unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("YAML parse error"));
    }
}
