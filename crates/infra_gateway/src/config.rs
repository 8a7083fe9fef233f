//! Gateway configuration

use serde::Deserialize;

use core_kernel::CircuitBreakerConfig;

/// Configuration for the remote invoicing API gateway
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the remote API (e.g., "https://invoices.example.com")
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Number of retry attempts for transient failures
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Retry delay in milliseconds (exponential backoff base)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Circuit breaker configuration; None disables circuit breaking
    #[serde(default = "default_circuit_breaker")]
    pub circuit_breaker: Option<CircuitBreakerConfig>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_circuit_breaker() -> Option<CircuitBreakerConfig> {
    Some(CircuitBreakerConfig::default())
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: default_timeout_secs(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            circuit_breaker: default_circuit_breaker(),
        }
    }
}

impl GatewayConfig {
    /// Loads configuration from `INVOICE_`-prefixed environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("INVOICE"))
            .build()?
            .try_deserialize()
    }

    /// Joins a path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.retry_attempts, 3);
        assert!(config.circuit_breaker.is_some());
    }

    #[test]
    fn test_from_env_reads_prefixed_vars() {
        std::env::set_var("INVOICE_BASE_URL", "https://env.example.com");

        let config = GatewayConfig::from_env().unwrap();
        assert_eq!(config.base_url, "https://env.example.com");
        assert_eq!(config.retry_attempts, 3);

        std::env::remove_var("INVOICE_BASE_URL");
    }

    #[test]
    fn test_endpoint_joins_cleanly() {
        let config = GatewayConfig {
            base_url: "https://api.example.com/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.endpoint("/api/address-book"),
            "https://api.example.com/api/address-book"
        );
        assert_eq!(
            config.endpoint("api/invoice"),
            "https://api.example.com/api/invoice"
        );
    }
}
