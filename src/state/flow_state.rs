// src/state/flow_state.rs
use std::collections::BTreeSet;

use tracing::debug;

use crate::api::{AnalysisResult, Post};
use crate::state::selection::SelectionSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThreadConfig {
    pub thread_id: String,
    pub selected_options: BTreeSet<String>,
}

impl ThreadConfig {
    /// A thread chosen as a whole: its only option is itself.
    pub fn for_thread(thread_id: &str) -> Self {
        Self {
            thread_id: thread_id.to_string(),
            selected_options: BTreeSet::from([thread_id.to_string()]),
        }
    }
}

/// Progress through the wizard. `Default` is the initial empty state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowState {
    pub market_id: Option<String>,
    pub selected_cards: SelectionSet,
    pub thread_config: Vec<ThreadConfig>,
    pub selected_option: Option<String>,
    pub selected_threads: Vec<Post>,
    pub analysis_results: Option<AnalysisResult>,
    pub search_query: Option<String>,
}

/// Owner of [`FlowState`]. Readable everywhere, written only through these setters.
#[derive(Debug, Default)]
pub struct FlowStore {
    state: FlowState,
}

impl FlowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn set_market(&mut self, id: &str) {
        self.state.market_id = Some(id.to_string());
    }

    pub fn toggle_selection(&mut self, id: &str) -> bool {
        self.state.selected_cards.toggle(id)
    }

    pub fn set_selections<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.selected_cards = ids.into_iter().collect();
    }

    pub fn set_thread_config(&mut self, config: Vec<ThreadConfig>) {
        self.state.thread_config = config;
    }

    pub fn set_selected_threads(&mut self, threads: Vec<Post>) {
        self.state.selected_threads = threads;
    }

    pub fn set_option(&mut self, id: Option<&str>) {
        self.state.selected_option = id.map(str::to_string);
    }

    pub fn set_analysis_results(&mut self, result: Option<AnalysisResult>) {
        self.state.analysis_results = result;
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.state.search_query = Some(query.to_string());
    }

    /// Replaces the whole state at once; no field survives.
    pub fn reset(&mut self) {
        debug!("flow state reset");
        self.state = FlowState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn initializes_with_default_values() {
        let store = FlowStore::new();
        let state = store.state();
        assert_eq!(state.market_id, None);
        assert!(state.selected_cards.is_empty());
        assert!(state.thread_config.is_empty());
        assert_eq!(state.selected_option, None);
        assert!(state.selected_threads.is_empty());
        assert_eq!(state.analysis_results, None);
        assert_eq!(state.search_query, None);
    }

    #[test]
    fn sets_market_id() {
        let mut store = FlowStore::new();
        store.set_market("market-123");
        assert_eq!(store.state().market_id.as_deref(), Some("market-123"));
    }

    #[test]
    fn toggles_selection_on_and_off() {
        let mut store = FlowStore::new();
        store.set_selections(["card-1", "card-2"]);
        assert!(!store.toggle_selection("card-1"));
        assert!(!store.state().selected_cards.contains("card-1"));
        assert!(store.state().selected_cards.contains("card-2"));
        assert!(store.toggle_selection("card-1"));
    }

    #[test]
    fn sets_thread_config_wholesale() {
        let mut store = FlowStore::new();
        store.set_thread_config(vec![ThreadConfig::for_thread("old")]);
        let config = vec![
            ThreadConfig::for_thread("thread-1"),
            ThreadConfig {
                thread_id: "thread-2".into(),
                selected_options: BTreeSet::from(["opt-2".to_string(), "opt-3".to_string()]),
            },
        ];
        store.set_thread_config(config.clone());
        assert_eq!(store.state().thread_config, config);
    }

    #[test]
    fn reset_restores_every_field() {
        let mut store = FlowStore::new();
        store.set_market("market-123");
        store.set_selections(["card-1", "card-2"]);
        store.set_thread_config(vec![ThreadConfig::for_thread("t")]);
        store.set_option(Some("option-123"));
        store.set_analysis_results(Some(AnalysisResult::default()));
        store.set_search_query("sleep");

        store.reset();
        assert_eq!(store.state(), &FlowState::default());
    }
}
