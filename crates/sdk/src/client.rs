//! SDK client implementation
//!
//! [`Client`] owns one HTTP connection pool and the configuration it was
//! built with. Every call sends exactly one request; failures are returned
//! to the caller as they are.

use crate::config::ClientConfig;
use crate::error::{FieldError, SdkError, SdkResult};
use crate::services::SystemService;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, RETRY_AFTER, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// Main SDK client
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    config: ClientConfig,
}

impl Client {
    /// Create a new client builder
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> SdkResult<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let agent = HeaderValue::from_str(&config.user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("evalboard-sdk"));
        headers.insert(USER_AGENT, agent);

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| SdkError::ConfigError {
                message: format!("cannot build HTTP client: {}", e),
            })?;

        Ok(Self {
            inner: Arc::new(ClientInner { http, config }),
        })
    }

    /// Create a client from environment variables
    pub fn from_env() -> SdkResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Get the configuration
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Get the system service
    pub fn systems(&self) -> SystemService {
        SystemService::new(self.clone())
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> SdkResult<T> {
        self.send(Method::GET, path, Option::<&()>::None).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> SdkResult<T> {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn send<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> SdkResult<T> {
        let config = &self.inner.config;
        let url = format!("{}{}", config.base_url.trim_end_matches('/'), path);
        if config.debug {
            debug!(%method, %url, "sending request");
        }

        let mut request = self.inner.http.request(method, &url);
        if let Some((username, api_key)) = config.credentials() {
            request = request.basic_auth(username, Some(api_key));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let text = response.text().await?;

        if config.debug {
            debug!(status = status.as_u16(), body = %text, "received response");
        }

        if !status.is_success() {
            return Err(error_for_status(status, &text, retry_after));
        }

        serde_json::from_str(&text).map_err(|e| {
            error!(error = %e, "response is not the expected JSON");
            SdkError::InvalidResponse {
                message: format!("cannot parse response body: {}", e),
            }
        })
    }
}

/// Error body sent by the service
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(alias = "detail")]
    message: String,
    #[serde(default)]
    field_errors: Vec<ErrorBodyField>,
}

#[derive(Debug, Deserialize)]
struct ErrorBodyField {
    field: String,
    message: String,
}

/// Map a non-success response to the error it stands for
fn error_for_status(status: StatusCode, body: &str, retry_after: Option<u64>) -> SdkError {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok();
    let status_code = status.as_u16();
    let message = match &parsed {
        Some(parsed) => parsed.message.clone(),
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => status.canonical_reason().unwrap_or("no message").to_string(),
    };

    match status_code {
        401 => SdkError::Unauthorized {
            status_code,
            message,
        },
        403 => SdkError::Forbidden { message },
        404 => SdkError::not_found("system", message),
        400 | 409 | 422 => SdkError::Rejected {
            status_code,
            message,
            field_errors: parsed
                .map(|p| p.field_errors)
                .unwrap_or_default()
                .into_iter()
                .map(|f| FieldError::new(f.field, f.message))
                .collect(),
        },
        429 => SdkError::RateLimited { retry_after },
        500..=599 => SdkError::ServerError {
            status_code,
            message,
        },
        _ => SdkError::InvalidResponse {
            message: format!("unexpected status {}: {}", status_code, message),
        },
    }
}

/// Client builder for ergonomic configuration
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the frontend URL
    pub fn frontend_url(mut self, url: impl Into<String>) -> Self {
        self.config.frontend_url = url.into();
        self
    }

    /// Set the username and API key
    pub fn credentials(mut self, username: impl Into<String>, api_key: impl Into<String>) -> Self {
        self.config = self.config.with_credentials(username, api_key);
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Log request and response bodies
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Build the client
    pub fn build(self) -> SdkResult<Client> {
        Client::new(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = Client::builder()
            .base_url("https://api.example.com")
            .credentials("me@example.com", "test-key")
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap();

        assert_eq!(client.config().base_url, "https://api.example.com");
        assert_eq!(client.config().api_key, Some("test-key".to_string()));
        assert_eq!(client.config().timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        assert!(Client::builder().base_url("not a url").build().is_err());
    }

    #[test]
    fn test_rejected_submission_lists_fields() {
        let body = r#"{"detail": "unknown metric", "field_errors": [
            {"field": "metadata.metric_names", "message": "unknown metric"}]}"#;
        match error_for_status(StatusCode::UNPROCESSABLE_ENTITY, body, None) {
            SdkError::Rejected {
                status_code,
                message,
                field_errors,
            } => {
                assert_eq!(status_code, 422);
                assert_eq!(message, "unknown metric");
                assert_eq!(field_errors[0].field, "metadata.metric_names");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_status_mapping_without_json_body() {
        assert!(matches!(
            error_for_status(StatusCode::TOO_MANY_REQUESTS, "", Some(7)),
            SdkError::RateLimited { retry_after: Some(7) }
        ));
        match error_for_status(StatusCode::BAD_GATEWAY, "bad gateway", None) {
            SdkError::ServerError {
                status_code,
                message,
            } => {
                assert_eq!(status_code, 502);
                assert_eq!(message, "bad gateway");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            error_for_status(StatusCode::IM_A_TEAPOT, "", None),
            SdkError::InvalidResponse { .. }
        ));
    }
}
