use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::paths::Paths;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryConfig {
    /// Max entries rendered into the prompt summary.
    #[serde(default = "default_summary_max_entries")]
    pub summary_max_entries: usize,
    /// Entries below this importance are left out of the prompt summary.
    #[serde(default = "default_summary_min_importance")]
    pub summary_min_importance: i64,
}

fn default_summary_max_entries() -> usize {
    10
}

fn default_summary_min_importance() -> i64 {
    2
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            summary_max_entries: default_summary_max_entries(),
            summary_min_importance: default_summary_min_importance(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SmartHomeConfig {
    /// Base URL of the smart-home bridge (e.g. "http://127.0.0.1:8123").
    /// The smart-home skill refuses to run when unset.
    #[serde(default)]
    pub bridge_url: Option<String>,
    #[serde(default)]
    pub api_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfig {
    /// Where generated reports are written. Defaults to the workspace
    /// reports directory when unset.
    #[serde(default)]
    pub output_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub smart_home: SmartHomeConfig,
    #[serde(default)]
    pub reports: ReportConfig,
}

impl Config {
    /// Load config from the default location. A missing file yields defaults;
    /// a malformed file is a Config error, not a silent reset.
    pub fn load() -> Result<Self> {
        let paths = Paths::default();
        Self::load_from(&paths.config_file())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.memory.summary_max_entries, 10);
        assert_eq!(config.memory.summary_min_importance, 2);
        assert!(config.smart_home.bridge_url.is_none());
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.memory.summary_max_entries, 10);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"smartHome": {"bridgeUrl": "http://10.0.0.2:8123"}}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(
            config.smart_home.bridge_url.as_deref(),
            Some("http://10.0.0.2:8123")
        );
        assert_eq!(config.memory.summary_max_entries, 10);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let mut config = Config::default();
        config.smart_home.bridge_url = Some("http://localhost:8123".to_string());
        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.smart_home.bridge_url, config.smart_home.bridge_url);
    }
}
