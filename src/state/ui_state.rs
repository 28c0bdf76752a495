// src/state/ui_state.rs
use std::time::{Duration, Instant};

use crate::api::{Post, TrendingTopic};
use crate::error::WizardError;
use crate::state::selection::SelectionModel;
use crate::taxonomy::{FlattenedCategory, ResultsView};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PageStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    /// Loaded fine, nothing to show.
    Empty,
    Failed(String),
}

impl PageStatus {
    pub fn is_settled(&self) -> bool {
        matches!(self, PageStatus::Ready | PageStatus::Empty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }

    pub fn from_error(err: &WizardError) -> Self {
        if err.is_recoverable() {
            Self::warning(err.to_string())
        } else {
            Self::error(err.to_string())
        }
    }

    pub fn duration(&self) -> Duration {
        match self.level {
            NoticeLevel::Error => Duration::from_secs(4),
            _ => Duration::from_secs(3),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub notice: Notice,
    pub expires_at: Instant,
}

#[derive(Debug, Default)]
pub struct ToastQueue {
    items: Vec<Toast>,
}

impl ToastQueue {
    const MAX_VISIBLE: usize = 4;

    pub fn push(&mut self, notice: Notice, now: Instant) {
        let expires_at = now + notice.duration();
        self.items.push(Toast { notice, expires_at });
        if self.items.len() > Self::MAX_VISIBLE {
            self.items.remove(0);
        }
    }

    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|t| t.expires_at > now);
    }

    pub fn visible(&self) -> &[Toast] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct SearchPage {
    pub input: String,
    pub status: PageStatus,
    pub trending: Vec<TrendingTopic>,
    pub trending_status: PageStatus,
}

#[derive(Debug)]
pub struct ResultsPage {
    pub query: Option<String>,
    pub view: Option<ResultsView>,
    pub categories: SelectionModel,
    pub sub_topics: SelectionModel,
    pub status: PageStatus,
}

impl Default for ResultsPage {
    fn default() -> Self {
        Self {
            query: None,
            view: None,
            categories: SelectionModel::multi(),
            sub_topics: SelectionModel::multi(),
            status: PageStatus::Idle,
        }
    }
}

// Category and sub-topic names may contain any printable text
const KEY_SEPARATOR: char = '\u{1f}';

pub fn sub_topic_key(category: &str, sub_topic: &str) -> String {
    format!("{}{}{}", category, KEY_SEPARATOR, sub_topic)
}

pub fn sub_topic_name(key: &str) -> &str {
    key.split_once(KEY_SEPARATOR).map(|(_, name)| name).unwrap_or(key)
}

#[derive(Debug)]
pub struct CategoriesPage {
    pub query: Option<String>,
    pub categories: Vec<FlattenedCategory>,
    pub cards: SelectionModel,
    pub status: PageStatus,
}

impl Default for CategoriesPage {
    fn default() -> Self {
        Self {
            query: None,
            categories: Vec::new(),
            cards: SelectionModel::single(),
            status: PageStatus::Idle,
        }
    }
}

#[derive(Debug)]
pub struct ThreadsPage {
    pub query: Option<String>,
    pub posts: Vec<Post>,
    pub selection: SelectionModel,
    pub status: PageStatus,
}

impl Default for ThreadsPage {
    fn default() -> Self {
        Self {
            query: None,
            posts: Vec::new(),
            selection: SelectionModel::multi(),
            status: PageStatus::Idle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const PLANS: [Plan; 3] = [
    Plan {
        id: "option-1",
        title: "Basic Plan",
        description: "Perfect for small teams and startups getting started",
    },
    Plan {
        id: "option-2",
        title: "Professional Plan",
        description: "Advanced features for growing businesses",
    },
    Plan {
        id: "option-3",
        title: "Enterprise Plan",
        description: "Full-scale solution for large organizations",
    },
];

#[derive(Debug)]
pub struct OptionsPage {
    pub plans: SelectionModel,
    pub analysis_status: PageStatus,
}

impl Default for OptionsPage {
    fn default() -> Self {
        Self { plans: SelectionModel::single(), analysis_status: PageStatus::Idle }
    }
}

#[derive(Debug)]
pub struct LandingPage {
    pub opportunities: SelectionModel,
}

impl Default for LandingPage {
    fn default() -> Self {
        Self { opportunities: SelectionModel::single() }
    }
}

#[derive(Debug, Default)]
pub struct UiState {
    pub search: SearchPage,
    pub results: ResultsPage,
    pub categories: CategoriesPage,
    pub threads: ThreadsPage,
    pub options: OptionsPage,
    pub landing: LandingPage,
    pub toasts: ToastQueue,
    pub error_message: Option<String>,
}

impl UiState {
    /// Clears every wizard page; trending topics and toasts stay.
    pub fn reset_pages(&mut self) {
        let trending = std::mem::take(&mut self.search.trending);
        let trending_status = std::mem::take(&mut self.search.trending_status);
        self.search = SearchPage { trending, trending_status, ..SearchPage::default() };
        self.results = ResultsPage::default();
        self.categories = CategoriesPage::default();
        self.threads = ThreadsPage::default();
        self.options = OptionsPage::default();
        self.landing = LandingPage::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_topic_keys_keep_dashes_in_names() {
        let key = sub_topic_key("Self-care", "Post-workout recovery");
        assert_eq!(sub_topic_name(&key), "Post-workout recovery");
    }

    #[test]
    fn toasts_expire_and_cap() {
        let now = Instant::now();
        let mut toasts = ToastQueue::default();
        toasts.push(Notice::info("a"), now);
        toasts.push(Notice::error("b"), now);
        toasts.prune(now + Duration::from_millis(3500));
        assert_eq!(toasts.visible().len(), 1);
        assert_eq!(toasts.visible()[0].notice.message, "b");

        for i in 0..10 {
            toasts.push(Notice::info(i.to_string()), now);
        }
        assert_eq!(toasts.visible().len(), ToastQueue::MAX_VISIBLE);
    }

    #[test]
    fn page_reset_keeps_trending() {
        let mut ui = UiState::default();
        ui.search.input = "keto".into();
        ui.search.trending_status = PageStatus::Ready;
        ui.threads.selection.toggle("t1");

        ui.reset_pages();
        assert!(ui.search.input.is_empty());
        assert_eq!(ui.search.trending_status, PageStatus::Ready);
        assert!(ui.threads.selection.selected().is_empty());
    }
}
