// src/config/api.rs
use std::time::Duration;
use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub reddit_base_url: String,
    pub auth_token: Option<String>,
    pub crud_timeout_secs: u64,
    pub generation_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/dbas/api".to_string(),
            reddit_base_url: "http://localhost:8000/dbas/api".to_string(),
            auth_token: None,
            crud_timeout_secs: 10,
            generation_timeout_secs: 300,
        }
    }
}

impl ApiConfig {
    pub fn crud_timeout(&self) -> Duration {
        Duration::from_secs(self.crud_timeout_secs)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    // Joins without doubling or dropping the slash between base and path
    pub fn endpoint(base: &str, path: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}
