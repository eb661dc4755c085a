//! CLI configuration management
//!
//! Handles loading and saving configuration from ~/.evalboard/config.toml.
//! Values are layered: config file, then environment variables, then
//! command-line flags (applied in `main`).

use anyhow::{Context, Result};
use evalboard_domain::submission::{LanguagePair, DEFAULT_LANGUAGE};
use evalboard_sdk::{ClientConfig, Environment};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service deployment to talk to
    #[serde(default)]
    pub environment: Environment,

    /// Explicit API URL, overrides the deployment's default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Username (account email)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Pause between two submissions of a benchmark upload, in seconds
    #[serde(default = "default_submission_delay")]
    pub submission_delay_seconds: u64,

    /// Source language recorded on benchmark submissions
    #[serde(default = "default_language")]
    pub source_language: String,

    /// Target language recorded on benchmark submissions
    #[serde(default = "default_language")]
    pub target_language: String,

    /// Enable colored output
    #[serde(default = "default_colored")]
    pub colored: bool,

    /// Enable debug logging
    #[serde(default)]
    pub debug: bool,
}

fn default_timeout() -> u64 {
    evalboard_sdk::DEFAULT_TIMEOUT_SECS
}

fn default_submission_delay() -> u64 {
    5
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_colored() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            api_url: None,
            username: None,
            api_key: None,
            timeout_seconds: default_timeout(),
            submission_delay_seconds: default_submission_delay(),
            source_language: default_language(),
            target_language: default_language(),
            colored: default_colored(),
            debug: false,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".evalboard"))
    }

    /// Get the config file path
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;

        if let Ok(env) = std::env::var("EB_ENV") {
            config.environment = env.parse()?;
        }
        if let Ok(api_url) = std::env::var("EB_API_URL") {
            config.api_url = Some(api_url);
        }
        if let Ok(username) = std::env::var("EB_USERNAME") {
            config.username = Some(username);
        }
        if let Ok(api_key) = std::env::var("EB_API_KEY") {
            config.api_key = Some(api_key);
        }
        if std::env::var("EB_DEBUG").is_ok() {
            config.debug = true;
        }
        if std::env::var("NO_COLOR").is_ok() {
            config.colored = false;
        }

        Ok(config)
    }

    /// Load configuration from file only
    pub fn load_file() -> Result<Self> {
        let config_file = Self::config_file()?;

        if !config_file.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_file).context("Failed to read config file")?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse config file")
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir()?;
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        }

        let config_file = Self::config_file()?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_file, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Check if credentials are configured
    pub fn is_authenticated(&self) -> bool {
        self.username.is_some() && self.api_key.is_some()
    }

    /// SDK client configuration derived from this configuration
    pub fn client_config(&self) -> ClientConfig {
        let mut client = ClientConfig::for_environment(self.environment)
            .with_timeout(Duration::from_secs(self.timeout_seconds))
            .with_debug(self.debug);

        if let Some(url) = &self.api_url {
            client = client.with_base_url(url.clone());
        }
        client.username = self.username.clone();
        client.api_key = self.api_key.clone();
        client
    }

    /// Pause inserted between benchmark submissions
    pub fn submission_delay(&self) -> Duration {
        Duration::from_secs(self.submission_delay_seconds)
    }

    /// Languages recorded on benchmark submissions
    pub fn languages(&self) -> LanguagePair {
        LanguagePair {
            source: self.source_language.clone(),
            target: self.target_language.clone(),
        }
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "environment" | "env" | "server" => Some(self.environment.to_string()),
            "api_url" | "api-url" => self.api_url.clone(),
            "username" => self.username.clone(),
            "api_key" | "api-key" => self.api_key.clone(),
            "timeout" | "timeout_seconds" => Some(self.timeout_seconds.to_string()),
            "submission_delay" | "submission_delay_seconds" => {
                Some(self.submission_delay_seconds.to_string())
            }
            "source_language" => Some(self.source_language.clone()),
            "target_language" => Some(self.target_language.clone()),
            "colored" | "color" => Some(self.colored.to_string()),
            "debug" => Some(self.debug.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key, without saving
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "environment" | "env" | "server" => {
                self.environment = value.parse()?;
            }
            "api_url" | "api-url" => {
                self.api_url = Some(value.to_string());
            }
            "username" => {
                self.username = Some(value.to_string());
            }
            "api_key" | "api-key" => {
                self.api_key = Some(value.to_string());
            }
            "timeout" | "timeout_seconds" => {
                self.timeout_seconds = value.parse().context("Invalid timeout value")?;
            }
            "submission_delay" | "submission_delay_seconds" => {
                self.submission_delay_seconds = value.parse().context("Invalid delay value")?;
            }
            "source_language" => {
                self.source_language = value.to_string();
            }
            "target_language" => {
                self.target_language = value.to_string();
            }
            "colored" | "color" => {
                self.colored = value.parse().context("Invalid boolean value")?;
            }
            "debug" => {
                self.debug = value.parse().context("Invalid boolean value")?;
            }
            _ => anyhow::bail!("Unknown configuration key: {}", key),
        }
        Ok(())
    }

    /// Key/value pairs for display, with the API key masked
    pub fn display_items(&self) -> Vec<(&'static str, String)> {
        let unset = || "(not set)".to_string();
        vec![
            ("Environment", self.environment.to_string()),
            (
                "API URL",
                self.api_url
                    .clone()
                    .unwrap_or_else(|| self.environment.api_url().to_string()),
            ),
            ("Username", self.username.clone().unwrap_or_else(unset)),
            (
                "API Key",
                if self.api_key.is_some() {
                    "***".to_string()
                } else {
                    unset()
                },
            ),
            ("Timeout", format!("{}s", self.timeout_seconds)),
            ("Submission Delay", format!("{}s", self.submission_delay_seconds)),
            (
                "Languages",
                format!("{} -> {}", self.source_language, self.target_language),
            ),
        ]
    }
}
