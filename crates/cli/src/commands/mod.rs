//! CLI commands

pub mod config;
pub mod evaluate;
pub mod upload_benchmark;

use anyhow::{Context, Result};
use evalboard_domain::submission::system_details_from_value;
use evalboard_domain::BenchmarkManifest;
use evalboard_sdk::Client;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::config::Config;

/// Context passed to all commands
pub struct CommandContext {
    pub config: Config,
    pub client: Client,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::new(config.client_config()).context("Invalid client configuration")?;
        Ok(Self { config, client })
    }

    /// Check if user is authenticated, return error if not
    pub fn require_auth(&self) -> Result<()> {
        if !self.config.is_authenticated() {
            anyhow::bail!(
                "Not authenticated. Pass --username and --api-key, or set EB_USERNAME and EB_API_KEY."
            );
        }
        Ok(())
    }
}

fn read_json_file(path: &Path, what: &str) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file: {}", what, path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} file as JSON: {}", what, path.display()))
}

/// Load a benchmark manifest
pub fn load_manifest(path: &Path) -> Result<BenchmarkManifest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read benchmark file: {}", path.display()))?;
    BenchmarkManifest::from_json_str(&content)
        .with_context(|| format!("Invalid benchmark file: {}", path.display()))
}

/// Load the optional system details file; no file means no details
pub fn load_system_details(path: Option<&Path>) -> Result<Map<String, Value>> {
    let Some(path) = path else {
        return Ok(Map::new());
    };
    let value = read_json_file(path, "system details")?;
    system_details_from_value(value)
        .with_context(|| format!("Invalid system details file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_manifest() {
        let file = temp_file(
            r#"{"datasets": [{"dataset_name": "sst2", "task": "text-classification",
                "metrics": [{"name": "Accuracy"}], "output_file_type": "text"}]}"#,
        );
        let manifest = load_manifest(file.path()).unwrap();
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.datasets[0].dataset_split, "test");
    }

    #[test]
    fn test_load_manifest_errors_name_the_file() {
        let file = temp_file("{not json");
        let err = load_manifest(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid benchmark file"));

        let err = load_manifest(Path::new("/nonexistent/benchmark.json")).unwrap_err();
        assert!(err.to_string().contains("benchmark.json"));
    }

    #[test]
    fn test_load_system_details() {
        assert!(load_system_details(None).unwrap().is_empty());

        let file = temp_file(r#"{"model": "bert", "layers": 12}"#);
        let details = load_system_details(Some(file.path())).unwrap();
        assert_eq!(details["layers"], 12);

        let file = temp_file("[1, 2]");
        assert!(load_system_details(Some(file.path())).is_err());
    }

    #[test]
    fn test_require_auth() {
        let ctx = CommandContext::new(Config::default()).unwrap();
        assert!(ctx.require_auth().is_err());

        let mut config = Config::default();
        config.username = Some("me@example.com".to_string());
        config.api_key = Some("key".to_string());
        let ctx = CommandContext::new(config).unwrap();
        assert!(ctx.require_auth().is_ok());
    }
}
