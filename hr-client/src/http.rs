//! HTTP transport for the HR backend
//!
//! Resource endpoints live in [`crate::api`]; this module only knows how to
//! build, send and decode requests.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client for the HR REST backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    holiday_timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(ClientError::Config(format!(
                "base URL must start with http:// or https://, got {}",
                config.base_url
            )));
        }
        let client = Client::builder()
            .timeout(config.timeout_duration())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            holiday_timeout: config.holiday_timeout_duration(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn holiday_timeout(&self) -> Duration {
        self.holiday_timeout
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Request builder with the bearer header applied
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut request = self.client.request(method, self.url(path));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Request bounded by the holiday timeout
    pub fn holiday_request(&self, method: Method, path: &str) -> RequestBuilder {
        self.request(method, path).timeout(self.holiday_timeout)
    }

    async fn send(request: RequestBuilder) -> ClientResult<reqwest::Response> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout
            } else {
                ClientError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::debug!(status = %status, body = %text, "Backend returned an error status");
            return Err(ClientError::from_status(status, text));
        }
        Ok(response)
    }

    /// Send and decode a JSON body
    pub async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = Self::send(request).await?;
        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout
            } else {
                ClientError::Http(e)
            }
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            ClientError::InvalidResponse(format!("{e} ({} bytes)", bytes.len()))
        })
    }

    /// Send and ignore any response body
    pub async fn execute_empty(&self, request: RequestBuilder) -> ClientResult<()> {
        Self::send(request).await.map(|_| ())
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(self.request(Method::GET, path)).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.execute(self.request(Method::POST, path).json(body)).await
    }

    /// Make a POST request without body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(self.request(Method::POST, path)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.execute(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.execute(self.request(Method::PATCH, path).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.execute_empty(self.request(Method::DELETE, path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = HttpClient::new(&ClientConfig::new("http://localhost:8080/api/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(client.url("/goals/g1"), "http://localhost:8080/api/goals/g1");
        assert_eq!(client.url("roles"), "http://localhost:8080/api/roles");
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let err = HttpClient::new(&ClientConfig::new("localhost:8080")).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_token_and_timeouts_from_config() {
        let config = ClientConfig::default()
            .with_token("t0k")
            .with_holiday_timeout(4);
        let client = HttpClient::new(&config).unwrap();
        assert_eq!(client.token(), Some("t0k"));
        assert_eq!(client.holiday_timeout(), Duration::from_secs(4));
        assert_eq!(client.with_token("other").token(), Some("other"));
    }
}
