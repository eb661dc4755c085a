//! SDK configuration
//!
//! This module provides configuration options for the SDK client. A
//! [`ClientConfig`] is built once (explicitly, or from the environment) and
//! owned by the [`Client`](crate::Client); the SDK keeps no global credentials.

use crate::error::{SdkError, SdkResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Deployment of the evaluation service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production service
    #[default]
    Main,
    /// Pre-release service
    Staging,
    /// Service running on this machine
    Local,
}

impl Environment {
    /// Base URL of the API
    pub fn api_url(&self) -> &'static str {
        match self {
            Self::Main => "https://api.evalboard.dev/v1",
            Self::Staging => "https://api.staging.evalboard.dev/v1",
            Self::Local => "http://localhost:5000/api",
        }
    }

    /// Base URL of the web frontend
    pub fn frontend_url(&self) -> &'static str {
        match self {
            Self::Main => "https://evalboard.dev",
            Self::Staging => "https://staging.evalboard.dev",
            Self::Local => "http://localhost:3000",
        }
    }

    /// Name used on the command line and in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Staging => "staging",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "main" | "prod" | "production" => Ok(Self::Main),
            "staging" => Ok(Self::Staging),
            "local" => Ok(Self::Local),
            _ => Err(SdkError::ConfigError {
                message: format!("Unknown environment: {}. Use main, staging, or local", s),
            }),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the API
    pub base_url: String,

    /// Base URL of the web frontend, used to build links to systems
    pub frontend_url: String,

    /// Username (account email) for authentication
    pub username: Option<String>,

    /// API key for authentication
    pub api_key: Option<String>,

    /// Request timeout
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,

    /// Enable request/response logging
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl ClientConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration pointing at the given deployment
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            base_url: environment.api_url().to_string(),
            frontend_url: environment.frontend_url().to_string(),
            username: None,
            api_key: None,
            timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("evalboard-sdk/{}", crate::VERSION),
            debug: false,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Supported environment variables:
    /// - `EB_ENV`: Deployment (`main`, `staging`, `local`)
    /// - `EB_API_URL`: Base URL for the API, overrides `EB_ENV`
    /// - `EB_USERNAME`: Username for authentication
    /// - `EB_API_KEY`: API key for authentication
    /// - `EB_TIMEOUT`: Request timeout in seconds
    /// - `EB_DEBUG`: Enable debug logging
    pub fn from_env() -> SdkResult<Self> {
        let environment = match std::env::var("EB_ENV") {
            Ok(name) => name.parse()?,
            Err(_) => Environment::default(),
        };
        let mut config = Self::for_environment(environment);

        if let Ok(url) = std::env::var("EB_API_URL") {
            config.base_url = url;
        }

        if let Ok(username) = std::env::var("EB_USERNAME") {
            config.username = Some(username);
        }

        if let Ok(key) = std::env::var("EB_API_KEY") {
            config.api_key = Some(key);
        }

        if let Ok(timeout) = std::env::var("EB_TIMEOUT") {
            let secs: u64 = timeout.parse().map_err(|_| SdkError::ConfigError {
                message: format!("Invalid timeout value: {}", timeout),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if std::env::var("EB_DEBUG").is_ok() {
            config.debug = true;
        }

        Ok(config)
    }

    /// Set the base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the username and API key
    pub fn with_credentials(mut self, username: impl Into<String>, api_key: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> SdkResult<()> {
        if self.base_url.is_empty() {
            return Err(SdkError::ConfigError {
                message: "Base URL cannot be empty".to_string(),
            });
        }

        url::Url::parse(&self.base_url).map_err(|e| SdkError::ConfigError {
            message: format!("Invalid base URL: {}", e),
        })?;

        if self.username.is_some() != self.api_key.is_some() {
            return Err(SdkError::ConfigError {
                message: "Username and API key must be given together".to_string(),
            });
        }

        Ok(())
    }

    /// Username and API key, when both are configured
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.api_key) {
            (Some(user), Some(key)) => Some((user.as_str(), key.as_str())),
            _ => None,
        }
    }

    /// Frontend link to a system
    pub fn system_url(&self, system_id: &str) -> String {
        format!(
            "{}/systems?system_id={}",
            self.frontend_url.trim_end_matches('/'),
            system_id
        )
    }
}
