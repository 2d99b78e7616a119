//! Client configuration

use std::sync::Arc;
use std::time::Duration;

use crate::api::HrBackend;
use crate::{ClientResult, HttpClient, MockBackend};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HOLIDAY_TIMEOUT_SECS: u64 = 10;

/// Client configuration for the HR backend
///
/// # Environment
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HR_API_BASE_URL | http://localhost:8080/api | Backend base URL |
/// | HR_USE_MOCK_DATA | false | Serve from the in-memory mock backend |
/// | HR_REQUEST_TIMEOUT_SECS | 30 | Default request timeout |
/// | HR_HOLIDAY_TIMEOUT_SECS | 10 | Timeout for holiday endpoints |
/// | HR_API_TOKEN | unset | Bearer token passed through as-is |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL including any API prefix, e.g. `http://localhost:8080/api`
    pub base_url: String,

    /// Use [`MockBackend`] instead of HTTP
    pub use_mock_data: bool,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Upper bound for holiday requests, in seconds
    pub holiday_timeout: u64,

    /// Bearer token for authentication
    pub token: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            use_mock_data: false,
            timeout: DEFAULT_TIMEOUT_SECS,
            holiday_timeout: DEFAULT_HOLIDAY_TIMEOUT_SECS,
            token: None,
        }
    }

    /// Mock-data configuration; the base URL is unused
    pub fn mock() -> Self {
        Self::default().with_mock_data(true)
    }

    /// Load `.env` (if present) then read the process environment
    pub fn load() -> Self {
        if let Err(e) = dotenv::dotenv() {
            tracing::debug!(error = %e, "No .env file loaded");
        }
        Self::from_env()
    }

    /// Read configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |key: &str, default: u64| {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };
        Self {
            base_url: lookup("HR_API_BASE_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            use_mock_data: lookup("HR_USE_MOCK_DATA")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
                .unwrap_or(false),
            timeout: parsed("HR_REQUEST_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
            holiday_timeout: parsed("HR_HOLIDAY_TIMEOUT_SECS", DEFAULT_HOLIDAY_TIMEOUT_SECS),
            token: lookup("HR_API_TOKEN").filter(|v| !v.is_empty()),
        }
    }

    pub fn with_mock_data(mut self, enabled: bool) -> Self {
        self.use_mock_data = enabled;
        self
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_holiday_timeout(mut self, seconds: u64) -> Self {
        self.holiday_timeout = seconds;
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn holiday_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.holiday_timeout)
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<HttpClient> {
        HttpClient::new(self)
    }

    /// Mock or HTTP backend, per `use_mock_data`
    pub fn build_backend(&self) -> ClientResult<Arc<dyn HrBackend>> {
        if self.use_mock_data {
            tracing::info!("Using mock data backend");
            return Ok(Arc::new(MockBackend::seeded()));
        }
        tracing::info!(base_url = %self.base_url, "Using HTTP backend");
        Ok(Arc::new(self.build_http_client()?))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RolesApi;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert!(!config.use_mock_data);
        assert_eq!(config.timeout_duration(), Duration::from_secs(30));
        assert_eq!(config.holiday_timeout_duration(), Duration::from_secs(10));
        assert!(config.token.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("HR_API_BASE_URL", "https://hr.example.com/api"),
            ("HR_USE_MOCK_DATA", "TRUE"),
            ("HR_REQUEST_TIMEOUT_SECS", "5"),
            ("HR_HOLIDAY_TIMEOUT_SECS", " 3 "),
            ("HR_API_TOKEN", "abc"),
        ]));
        assert_eq!(config.base_url, "https://hr.example.com/api");
        assert!(config.use_mock_data);
        assert_eq!(config.timeout, 5);
        assert_eq!(config.holiday_timeout, 3);
        assert_eq!(config.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("HR_API_BASE_URL", "  "),
            ("HR_USE_MOCK_DATA", "maybe"),
            ("HR_REQUEST_TIMEOUT_SECS", "soon"),
            ("HR_API_TOKEN", ""),
        ]));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(!config.use_mock_data);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT_SECS);
        assert!(config.token.is_none());
    }

    #[tokio::test]
    async fn test_build_mock_backend() {
        let backend = ClientConfig::mock().build_backend().unwrap();
        let roles = backend.list_roles().await.unwrap();
        assert!(!roles.is_empty());
    }
}
