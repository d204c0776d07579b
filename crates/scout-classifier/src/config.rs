//! Configuration for the classification stage

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry settings for classification attempts
///
/// The wait before attempt `n + 1` is
/// `min(max_backoff, multiplier × initial_backoff × 2^(n − 1))`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts, including the first
    pub max_attempts: u32,

    /// Wait after the first failed attempt (milliseconds)
    pub initial_backoff_ms: u64,

    /// Upper bound for any single wait (milliseconds)
    pub max_backoff_ms: u64,

    /// Scale applied to the exponential sequence
    pub multiplier: f64,
}

impl Default for RetryConfig {
    /// 3 attempts, waits of 2s then 4s, capped at 10s
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 2_000,
            max_backoff_ms: 10_000,
            multiplier: 1.0,
        }
    }
}

/// Configuration for the classifier and pipeline runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Emit a diagnostic event for every retry
    pub debug: bool,

    /// Maximum classifications in flight at once
    pub max_concurrent: usize,

    /// Courtesy delay before each speaker's classification (milliseconds)
    pub request_delay_ms: u64,

    /// Upper bound for a single backend call (seconds)
    pub request_timeout_secs: u64,

    /// Sampling temperature passed to the backend
    pub temperature: f32,

    /// Retry policy
    pub retry: RetryConfig,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            debug: false,
            max_concurrent: 5,
            request_delay_ms: 500,
            request_timeout_secs: 60,
            temperature: scout_llm::DEFAULT_TEMPERATURE,
            retry: RetryConfig::default(),
        }
    }
}

impl ClassifierConfig {
    /// Get the request delay as a Duration
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// Get the backend call timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.max_concurrent == 0 {
            return invalid("max_concurrent must be greater than 0");
        }
        if self.request_timeout_secs == 0 {
            return invalid("request_timeout_secs must be greater than 0");
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return invalid("temperature must be between 0.0 and 2.0");
        }
        if self.retry.max_attempts == 0 {
            return invalid("retry.max_attempts must be at least 1");
        }
        if self.retry.initial_backoff_ms > self.retry.max_backoff_ms {
            return invalid("retry.initial_backoff_ms cannot exceed retry.max_backoff_ms");
        }
        if !(self.retry.multiplier.is_finite() && self.retry.multiplier > 0.0) {
            return invalid("retry.multiplier must be a positive number");
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Invalid(format!("Failed to serialize to TOML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClassifierConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.debug);
        assert_eq!(config.max_concurrent, 5);
        assert_eq!(config.request_delay(), Duration::from_millis(500));
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn test_invalid_concurrency() {
        let mut config = ClassifierConfig::default();
        config.max_concurrent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_backoff_bounds() {
        let mut config = ClassifierConfig::default();
        config.retry.initial_backoff_ms = 20_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_attempts() {
        let mut config = ClassifierConfig::default();
        config.retry.max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ClassifierConfig::from_toml(
            r#"
            debug = true
            max_concurrent = 2

            [retry]
            max_attempts = 4
            "#,
        )
        .unwrap();

        assert!(config.debug);
        assert_eq!(config.max_concurrent, 2);
        assert_eq!(config.retry.max_attempts, 4);
        assert_eq!(config.retry.initial_backoff_ms, 2_000);
        assert_eq!(config.request_timeout_secs, 60);
    }

    #[test]
    fn test_toml_rejects_invalid_values() {
        assert!(ClassifierConfig::from_toml("max_concurrent = 0").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ClassifierConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ClassifierConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }
}
