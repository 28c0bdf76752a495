// src/config/mod.rs
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use serde::{Serialize, Deserialize};

pub mod api;
pub mod research;

// Re-export commonly used types
pub use api::ApiConfig;
pub use research::ResearchConfig;

pub const APP_DIR: &str = "niche-scout";
const ENV_PREFIX: &str = "NICHE_SCOUT";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub research: ResearchConfig,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            research: ResearchConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// Defaults, then the config file if it exists, then `NICHE_SCOUT__*` variables.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::build(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        Self::build(Some(path))
    }

    fn build(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.api.crud_timeout_secs, 10);
        assert_eq!(config.api.generation_timeout_secs, 300);
        assert_eq!(config.research.max_topic_len, 500);
    }

    #[test]
    fn file_overrides_selected_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "log_filter = \"debug\"").unwrap();
        writeln!(file, "[research]").unwrap();
        writeln!(file, "top_n = 5").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.research.top_n, 5);
        assert_eq!(config.research.num_results, 100);
    }

    #[test]
    fn endpoint_joins_cleanly() {
        assert_eq!(
            ApiConfig::endpoint("http://host/api/", "/market-ideas/generate/"),
            "http://host/api/market-ideas/generate/"
        );
    }
}
