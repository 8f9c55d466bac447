//! API configuration
//!
//! Server settings are read from `API_*` variables, settlement parameters
//! from `SETTLEMENT_*` variables. Anything unset keeps its default.

use serde::Deserialize;

use domain_settlement::SettlementConfig;

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Maximum number of queued claims the worker drains per batch
    pub queue_batch_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            queue_batch_size: 10,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Loads the settlement parameters from `SETTLEMENT_*` variables
///
/// For example `SETTLEMENT_TAX_RATE=0.10` or
/// `SETTLEMENT_TIMEZONE=Atlantic/Canary`.
pub fn load_settlement_config() -> Result<SettlementConfig, config::ConfigError> {
    config::Config::builder()
        .add_source(config::Environment::with_prefix("SETTLEMENT"))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_server_addr() {
        assert_eq!(ApiConfig::default().server_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_log_format_names() {
        let format: LogFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, LogFormat::Json);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: ApiConfig = serde_json::from_str(r#"{"port": 9000}"#).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.queue_batch_size, 10);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }
}
