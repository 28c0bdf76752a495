// src/config/research.rs
use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResearchConfig {
    pub model: String,
    pub temperature: f32,
    pub num_results: u32,
    pub top_n: u32,
    pub max_topic_len: usize,
    pub max_query_len: usize,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            num_results: 100,
            top_n: 20,
            max_topic_len: 500,
            max_query_len: 200,
        }
    }
}
