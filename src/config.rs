//! Client configuration
//!
//! The client needs a service key issued by the public data portal, plus
//! transport settings. Configuration is read from a YAML file, from the
//! environment, or both (environment wins).
//!
//! ```yaml
//! service_key: "your-key"
//! base_url: "https://apis.data.go.kr"
//! timeout_secs: 30
//! retry_count: 3
//! ```

use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default public endpoint of the data portal
pub const DEFAULT_BASE_URL: &str = "https://apis.data.go.kr";

/// Environment variable holding the service key
pub const ENV_SERVICE_KEY: &str = "PUBLIC_DATA_SERVICE_KEY";
/// Environment variable overriding the base URL
pub const ENV_BASE_URL: &str = "PUBLIC_DATA_BASE_URL";
/// Environment variable overriding the timeout, in seconds
pub const ENV_TIMEOUT: &str = "PUBLIC_DATA_TIMEOUT";
/// Environment variable overriding the retry count
pub const ENV_RETRY_COUNT: &str = "PUBLIC_DATA_RETRY_COUNT";

/// Configuration for the rent transaction client
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service key issued by the data portal
    #[serde(default)]
    pub service_key: String,

    /// Base URL the endpoint path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries after the first attempt on transport failure
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Initial backoff between retries in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff between retries in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Backoff strategy
    #[serde(default)]
    pub backoff_type: BackoffType,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_count() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    100
}

fn default_max_backoff_ms() -> u64 {
    10_000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_key: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            retry_count: default_retry_count(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            backoff_type: BackoffType::default(),
        }
    }
}

impl ClientConfig {
    /// Create a config with the given service key and default settings
    pub fn new(service_key: impl Into<String>) -> Self {
        Self {
            service_key: service_key.into(),
            ..Default::default()
        }
    }

    /// Parse a config from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file '{}': {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Build a config from the environment only
    pub fn from_env() -> Result<Self> {
        Self::default().apply_env()
    }

    /// Override fields with any environment variables that are set
    pub fn apply_env(self) -> Result<Self> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    /// Override fields from a variable source
    pub fn apply_vars<F>(mut self, var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = var(ENV_SERVICE_KEY) {
            self.service_key = key;
        }
        if let Some(url) = var(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(timeout) = var(ENV_TIMEOUT) {
            self.timeout_secs = timeout
                .trim()
                .parse()
                .map_err(|_| Error::invalid_config(ENV_TIMEOUT, format!("not a number: {timeout}")))?;
        }
        if let Some(retries) = var(ENV_RETRY_COUNT) {
            self.retry_count = retries.trim().parse().map_err(|_| {
                Error::invalid_config(ENV_RETRY_COUNT, format!("not a number: {retries}"))
            })?;
        }
        Ok(self)
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the retry count
    #[must_use]
    pub fn with_retry_count(mut self, retries: u32) -> Self {
        self.retry_count = retries;
        self
    }

    /// Set the backoff between retries
    #[must_use]
    pub fn with_backoff(mut self, backoff_type: BackoffType, initial_ms: u64, max_ms: u64) -> Self {
        self.backoff_type = backoff_type;
        self.initial_backoff_ms = initial_ms;
        self.max_backoff_ms = max_ms;
        self
    }

    /// Whether a non-blank service key is configured
    pub fn has_service_key(&self) -> bool {
        !self.service_key.trim().is_empty()
    }

    /// Check the config is usable for live calls
    pub fn validate(&self) -> Result<()> {
        if !self.has_service_key() {
            return Err(Error::invalid_config(
                "service_key",
                format!("service key is empty (set {ENV_SERVICE_KEY})"),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_config("timeout_secs", "must be at least 1"));
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_config("base_url", e.to_string()))?;
        Ok(())
    }

    /// Per-call timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Transport settings derived from this config
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::builder()
            .base_url(self.base_url.clone())
            .timeout(self.timeout())
            .max_retries(self.retry_count)
            .backoff(
                self.backoff_type,
                Duration::from_millis(self.initial_backoff_ms),
                Duration::from_millis(self.max_backoff_ms),
            )
            .build()
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = if self.has_service_key() { "***" } else { "" };
        f.debug_struct("ClientConfig")
            .field("service_key", &key)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("retry_count", &self.retry_count)
            .field("initial_backoff_ms", &self.initial_backoff_ms)
            .field("max_backoff_ms", &self.max_backoff_ms)
            .field("backoff_type", &self.backoff_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.retry_count, 3);
        assert!(!config.has_service_key());
    }

    #[test]
    fn test_from_yaml_with_defaults() {
        let config = ClientConfig::from_yaml_str("service_key: abc\nretry_count: 1\n").unwrap();
        assert_eq!(config.service_key, "abc");
        assert_eq!(config.retry_count, 1);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.backoff_type, BackoffType::Exponential);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "service_key: from-file").unwrap();
        writeln!(file, "base_url: http://localhost:9000").unwrap();
        writeln!(file, "backoff_type: constant").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.service_key, "from-file");
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.backoff_type, BackoffType::Constant);
    }

    #[test]
    fn test_from_missing_file() {
        let err = ClientConfig::from_file("/nonexistent/rtms.yaml").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_env_overrides_file_values() {
        let config = ClientConfig::from_yaml_str("service_key: file\ntimeout_secs: 10\n")
            .unwrap()
            .apply_vars(vars(&[
                (ENV_SERVICE_KEY, "env"),
                (ENV_TIMEOUT, "5"),
                (ENV_RETRY_COUNT, "0"),
            ]))
            .unwrap();
        assert_eq!(config.service_key, "env");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.retry_count, 0);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_env_invalid_number() {
        let err = ClientConfig::default()
            .apply_vars(vars(&[(ENV_RETRY_COUNT, "many")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_RETRY_COUNT));
    }

    #[test]
    fn test_validate() {
        assert!(ClientConfig::new("key").validate().is_ok());
        assert!(ClientConfig::new("   ").validate().is_err());
        assert!(ClientConfig::new("key").with_timeout_secs(0).validate().is_err());
        assert!(ClientConfig::new("key")
            .with_base_url("not a url")
            .validate()
            .is_err());
    }

    #[test]
    fn test_debug_redacts_service_key() {
        let debug = format!("{:?}", ClientConfig::new("super-secret"));
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn test_http_config() {
        let http = ClientConfig::new("key")
            .with_timeout_secs(7)
            .with_retry_count(2)
            .with_backoff(BackoffType::Linear, 50, 500)
            .http_config();
        assert_eq!(http.base_url.as_deref(), Some(DEFAULT_BASE_URL));
        assert_eq!(http.timeout, Duration::from_secs(7));
        assert_eq!(http.max_retries, 2);
        assert_eq!(http.backoff_type, BackoffType::Linear);
        assert_eq!(http.initial_backoff, Duration::from_millis(50));
        assert_eq!(http.max_backoff, Duration::from_millis(500));
    }
}
