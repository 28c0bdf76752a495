// src/api/types.rs
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::WizardError;
use crate::taxonomy::Taxonomy;

// Some backends send ids and timestamps as numbers, some as strings
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) => s,
        Some(Raw::Int(i)) => i.to_string(),
        Some(Raw::Float(f)) => format!("{}", f.trunc() as i64),
        None => String::new(),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub rank: u32,
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub upvotes: i64,
    #[serde(default)]
    pub comments: i64,
    #[serde(default)]
    pub preview: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default, deserialize_with = "string_or_number")]
    pub created_utc: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreadCategory {
    Trending,
    Hot,
    Rising,
}

impl ThreadCategory {
    pub const ALL: [ThreadCategory; 3] = [ThreadCategory::Trending, ThreadCategory::Hot, ThreadCategory::Rising];

    pub fn label(&self) -> &'static str {
        match self {
            ThreadCategory::Trending => "Trending",
            ThreadCategory::Hot => "Hot",
            ThreadCategory::Rising => "Rising",
        }
    }
}

impl Post {
    /// `index` is the post's position in the result list.
    pub fn category(&self, index: usize) -> ThreadCategory {
        if self.upvotes > 5000 {
            ThreadCategory::Trending
        } else if index < 5 {
            ThreadCategory::Hot
        } else {
            ThreadCategory::Rising
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let secs: i64 = self.created_utc.trim().parse().ok()?;
        Utc.timestamp_opt(secs, 0).single()
    }

    pub fn time_ago(&self, now: DateTime<Utc>) -> String {
        let Some(created) = self.created_at() else {
            return "Unknown".to_string();
        };

        let hours = (now - created).num_hours();
        match hours {
            h if h < 1 => "Just now".to_string(),
            h if h < 24 => format!("{} hours ago", h),
            h if h / 24 == 1 => "1 day ago".to_string(),
            h => format!("{} days ago", h / 24),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PainPoint {
    #[serde(alias = "pain_point", alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub frequency: Option<u32>,
    #[serde(default)]
    pub severity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    #[serde(default)]
    pub rank: u32,
    pub solution_name: String,
    #[serde(default)]
    pub market_size_potential: String,
    #[serde(default)]
    pub implementation_feasibility: String,
    #[serde(default)]
    pub competitive_advantage: String,
    #[serde(default)]
    pub category_dominance_potential: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketGaps {
    #[serde(default)]
    pub opportunity_assessment: Vec<Opportunity>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Server-computed report. Only the parts the views render are typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub pain_points: Vec<PainPoint>,
    #[serde(default)]
    pub market_gaps: Option<MarketGaps>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisResult {
    pub fn opportunities(&self) -> &[Opportunity] {
        self.market_gaps
            .as_ref()
            .map(|gaps| gaps.opportunity_assessment.as_slice())
            .unwrap_or(&[])
    }

    /// Landing page creation only offers the three leading opportunities.
    pub fn top_opportunities(&self) -> &[Opportunity] {
        let all = self.opportunities();
        &all[..all.len().min(3)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopicCategory {
    Health,
    Wealth,
    Relationships,
}

impl TopicCategory {
    const HEALTH_WORDS: [&'static str; 3] = ["health", "medical", "fitness"];
    const WEALTH_WORDS: [&'static str; 4] = ["money", "finance", "investment", "business"];
    const RELATIONSHIP_WORDS: [&'static str; 3] = ["relationship", "dating", "social"];

    pub fn classify(text: &str) -> Self {
        let text = text.to_lowercase();
        let has_any = |words: &[&str]| words.iter().any(|w| text.contains(w));

        if has_any(&Self::HEALTH_WORDS) {
            TopicCategory::Health
        } else if has_any(&Self::WEALTH_WORDS) {
            TopicCategory::Wealth
        } else if has_any(&Self::RELATIONSHIP_WORDS) {
            TopicCategory::Relationships
        } else {
            TopicCategory::Health
        }
    }

    pub fn market_id(&self) -> &'static str {
        match self {
            TopicCategory::Health => "1",
            TopicCategory::Wealth => "2",
            TopicCategory::Relationships => "3",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TopicCategory::Health => "Health",
            TopicCategory::Wealth => "Wealth",
            TopicCategory::Relationships => "Relationships",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BackendTrendingTopic {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(alias = "title")]
    pub topic: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "growth", alias = "growth_rate")]
    pub trend: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingTopic {
    pub id: String,
    pub category: TopicCategory,
    pub trend: String,
    pub title: String,
}

impl TrendingTopic {
    pub fn from_backend(index: usize, topic: BackendTrendingTopic) -> Self {
        let text = format!("{} {}", topic.topic, topic.description.as_deref().unwrap_or(""));
        Self {
            id: if topic.id.is_empty() { (index + 1).to_string() } else { topic.id },
            category: TopicCategory::classify(&text),
            trend: topic.trend.unwrap_or_default(),
            title: topic.topic,
        }
    }
}

/// Market ideas as fetched: the raw JSON text is kept for the session cache.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketIdeas {
    pub raw: String,
    pub taxonomy: Taxonomy,
}

// Response envelopes

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_ok(&self) -> bool {
        self.success || self.status.as_deref() == Some("success")
    }

    pub fn into_data(self, http_status: u16, what: &str) -> Result<T, WizardError> {
        if !self.is_ok() {
            return Err(WizardError::Http {
                status: http_status,
                message: self.message.unwrap_or_else(|| format!("Failed to fetch {}", what)),
            });
        }
        self.data
            .ok_or_else(|| WizardError::parse(format!("No {} data received from backend", what)))
    }
}

#[derive(Debug, Deserialize)]
pub struct GeneratedText {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateData {
    #[serde(default)]
    pub data: Option<GeneratedText>,
}

impl GenerateData {
    pub fn into_market_ideas(self) -> Result<MarketIdeas, WizardError> {
        let raw = self
            .data
            .and_then(|d| d.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| WizardError::parse("No market ideas data received from backend"))?;
        let taxonomy = Taxonomy::from_json_str(&raw)?;
        Ok(MarketIdeas { raw, taxonomy })
    }
}

#[derive(Debug, Deserialize)]
pub struct ResearchData {
    #[serde(default)]
    pub top_posts: Vec<Post>,
}
