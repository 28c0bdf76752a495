// src/api/mod.rs
use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, error};

use crate::config::{ApiConfig, ResearchConfig};
use crate::error::WizardError;

pub mod types;
pub mod worker;

pub use types::{AnalysisResult, MarketIdeas, Opportunity, PainPoint, Post, ThreadCategory, TopicCategory, TrendingTopic};
pub use worker::{ApiReply, ApiRequest, ApiWorker, Reply};

use types::{BackendTrendingTopic, Envelope, GenerateData, ResearchData};

/// The remote services the wizard depends on. All calls block; the UI runs
/// them through [`ApiWorker`].
#[cfg_attr(test, mockall::automock)]
pub trait ResearchApi: Send + Sync {
    fn generate_market_ideas(&self, topic: &str) -> Result<MarketIdeas, WizardError>;
    fn search_threads(&self, market: &str) -> Result<Vec<Post>, WizardError>;
    fn analyze_threads(&self, threads: &[Post]) -> Result<AnalysisResult, WizardError>;
    fn top_trending(&self) -> Result<Vec<TrendingTopic>, WizardError>;
}

pub fn validate_topic(topic: &str, max_len: usize) -> Result<String, WizardError> {
    validate_text(topic, max_len, "Please enter a search query", "Search topic")
}

pub fn validate_thread_query(query: &str, max_len: usize) -> Result<String, WizardError> {
    validate_text(query, max_len, "No search query provided", "Search query")
}

fn validate_text(text: &str, max_len: usize, empty_msg: &str, label: &str) -> Result<String, WizardError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(WizardError::validation(empty_msg));
    }
    if trimmed.chars().count() > max_len {
        return Err(WizardError::validation(format!(
            "{} is too long (max {} characters)",
            label, max_len
        )));
    }
    Ok(trimmed.to_string())
}

pub struct HttpResearchApi {
    api: ApiConfig,
    research: ResearchConfig,
    crud: Client,
    generation: Client,
}

impl HttpResearchApi {
    pub fn new(api: ApiConfig, research: ResearchConfig) -> Result<Self, WizardError> {
        let crud = Client::builder().timeout(api.crud_timeout()).build()?;
        let generation = Client::builder().timeout(api.generation_timeout()).build()?;
        Ok(Self { api, research, crud, generation })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T, WizardError> {
        let response = self.authorize(request).send().map_err(|e| {
            error!("{} request failed: {}", what, e);
            WizardError::from(e)
        })?;
        read_envelope(response, what)
    }
}

fn read_envelope<T: DeserializeOwned>(response: Response, what: &str) -> Result<T, WizardError> {
    let status = response.status();
    debug!("{} responded with {}", what, status);
    let body = response.text().map_err(WizardError::from)?;

    if !status.is_success() {
        let err = error_from_status(status.as_u16(), &body);
        error!("{} failed: {}", what, err);
        return Err(err);
    }

    let envelope: Envelope<T> = serde_json::from_str(&body)?;
    envelope.into_data(status.as_u16(), what)
}

/// Prefer the server's own `message`/`detail` over the bare status text.
pub fn error_from_status(status: u16, body: &str) -> WizardError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["message", "detail"]
                .iter()
                .find_map(|key| v.get(*key).and_then(|m| m.as_str()).map(str::to_string))
        })
        .or_else(|| {
            reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "Request failed".to_string());

    WizardError::Http { status, message }
}

impl ResearchApi for HttpResearchApi {
    fn generate_market_ideas(&self, topic: &str) -> Result<MarketIdeas, WizardError> {
        let topic = validate_topic(topic, self.research.max_topic_len)?;
        let url = ApiConfig::endpoint(&self.api.base_url, "/market-ideas/generate/");
        debug!("POST {} topic={:?}", url, topic);

        let request = self.generation.post(&url).json(&json!({
            "topic": topic,
            "model": self.research.model,
            "temperature": self.research.temperature,
        }));
        let data: GenerateData = self.send(request, "market ideas")?;
        data.into_market_ideas()
    }

    fn search_threads(&self, market: &str) -> Result<Vec<Post>, WizardError> {
        let market = validate_thread_query(market, self.research.max_query_len)?;
        let url = ApiConfig::endpoint(&self.api.reddit_base_url, "/reddit/complete-research");
        debug!("POST {} market={:?}", url, market);

        let request = self.generation.post(&url).json(&json!({
            "market": market,
            "num_results": self.research.num_results,
            "top_n": self.research.top_n,
        }));
        let data: ResearchData = self.send(request, "threads")?;
        Ok(data.top_posts)
    }

    fn analyze_threads(&self, threads: &[Post]) -> Result<AnalysisResult, WizardError> {
        let url = ApiConfig::endpoint(&self.api.base_url, "/pain-points/complete-analysis-file/");
        debug!("POST {} threads={}", url, threads.len());

        let payload = serde_json::to_vec(threads)?;
        let part = multipart::Part::bytes(payload)
            .file_name("threads.json")
            .mime_str("application/json")?;
        let form = multipart::Form::new().part("file", part);

        self.send(self.generation.post(&url).multipart(form), "pain point analysis")
    }

    fn top_trending(&self) -> Result<Vec<TrendingTopic>, WizardError> {
        let url = ApiConfig::endpoint(&self.api.base_url, "/trending/top-trending");
        debug!("GET {}", url);

        let topics: Vec<BackendTrendingTopic> = self.send(self.crud.get(&url), "trending topics")?;
        Ok(topics
            .into_iter()
            .enumerate()
            .map(|(i, t)| TrendingTopic::from_backend(i, t))
            .collect())
    }
}
