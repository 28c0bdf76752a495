// src/wizard/command.rs
use tracing::info;

use crate::api::{validate_topic, ApiRequest, TrendingTopic};
use crate::error::WizardError;
use crate::state::flow_state::ThreadConfig;
use crate::state::requests::RequestKind;
use crate::state::ui_state::{sub_topic_key, sub_topic_name, Notice, PageStatus, PLANS};
use crate::state::AppState;

use super::navigator;
use super::Route;

pub trait Command {
    fn execute(&self, state: &mut AppState) -> Result<(), WizardError>;
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

// Search

pub struct SubmitSearch;
impl Command for SubmitSearch {
    fn execute(&self, state: &mut AppState) -> Result<(), WizardError> {
        let topic = validate_topic(&state.ui.search.input, state.config.research.max_topic_len)?;
        begin_search(state, topic);
        Ok(())
    }
}

fn begin_search(state: &mut AppState, topic: String) {
    info!("generating market ideas for {:?}", topic);
    state.ui.search.status = PageStatus::Loading;
    state.requests.submit(RequestKind::Ideas, &topic, ApiRequest::GenerateIdeas { topic: topic.clone() });
    state.notify(Notice::info("Generating market ideas..."));
}

pub struct ExploreTrendingTopic(pub TrendingTopic);
impl Command for ExploreTrendingTopic {
    fn execute(&self, state: &mut AppState) -> Result<(), WizardError> {
        let topic = validate_topic(&self.0.title, state.config.research.max_topic_len)?;
        state.flow.set_market(self.0.category.market_id());
        state.ui.search.input = topic.clone();
        state.notify(Notice::success(format!("Exploring: {}", topic)));
        begin_search(state, topic);
        Ok(())
    }
}

// Results

pub struct ToggleResultsCategory(pub String);
impl Command for ToggleResultsCategory {
    fn execute(&self, state: &mut AppState) -> Result<(), WizardError> {
        state.ui.results.categories.toggle(&self.0);
        Ok(())
    }
}

pub struct ToggleResultsSubTopic {
    pub category: String,
    pub sub_topic: String,
}
impl Command for ToggleResultsSubTopic {
    fn execute(&self, state: &mut AppState) -> Result<(), WizardError> {
        let key = sub_topic_key(&self.category, &self.sub_topic);
        state.ui.results.sub_topics.toggle(&key);
        Ok(())
    }
}

/// Expands or collapses a card on the current page without touching its selection.
pub struct ToggleExpanded(pub String);
impl Command for ToggleExpanded {
    fn execute(&self, state: &mut AppState) -> Result<(), WizardError> {
        match state.route {
            Route::Results { .. } => state.ui.results.categories.toggle_expanded(&self.0),
            Route::Categories { .. } => state.ui.categories.cards.toggle_expanded(&self.0),
            Route::Threads { .. } => state.ui.threads.selection.toggle_expanded(&self.0),
            _ => return Ok(()),
        };
        Ok(())
    }
}

pub struct ProceedFromResults;
impl Command for ProceedFromResults {
    fn execute(&self, state: &mut AppState) -> Result<(), WizardError> {
        let page = &state.ui.results;
        let names: Vec<String> = page
            .categories
            .selected()
            .iter()
            .map(str::to_string)
            .chain(page.sub_topics.selected().iter().map(|key| sub_topic_name(key).to_string()))
            .collect();
        if names.is_empty() {
            return Err(WizardError::empty_selection("Please select at least one item"));
        }

        state.flow.set_selections(names.iter().cloned());
        state.notify(Notice::success(format!(
            "Searching Reddit for {} topic{}!",
            names.len(),
            plural(names.len())
        )));
        navigator::navigate(state, Route::threads(&names.join(", ")));
        Ok(())
    }
}

/// Opens the flattened category browser for the current search.
pub struct BrowseCategories;
impl Command for BrowseCategories {
    fn execute(&self, state: &mut AppState) -> Result<(), WizardError> {
        let query = match &state.route {
            Route::Results { query } => query.clone(),
            _ => state.ui.results.query.clone(),
        }
        .or_else(|| state.flow.state().search_query.clone());
        navigator::navigate(state, Route::categories(query.as_deref()));
        Ok(())
    }
}

// Categories

pub struct SelectCategory(pub String);
impl Command for SelectCategory {
    fn execute(&self, state: &mut AppState) -> Result<(), WizardError> {
        if state.ui.categories.cards.toggle(&self.0) {
            state.notify(Notice::success("Category selected"));
        }
        Ok(())
    }
}

pub struct ProceedFromCategories;
impl Command for ProceedFromCategories {
    fn execute(&self, state: &mut AppState) -> Result<(), WizardError> {
        let page = &state.ui.categories;
        let selected = page
            .cards
            .active()
            .and_then(|id| page.categories.iter().find(|c| c.id == id))
            .map(|c| (c.id.clone(), c.name.clone()));
        let Some((id, name)) = selected else {
            return Err(WizardError::empty_selection("Please select a category"));
        };

        state.flow.set_selections([id]);
        state.notify(Notice::success("Searching Reddit for this category!"));
        navigator::navigate(state, Route::threads(&name));
        Ok(())
    }
}

/// A subcategory or niche name used directly as the thread query.
pub struct ExploreNiche(pub String);
impl Command for ExploreNiche {
    fn execute(&self, state: &mut AppState) -> Result<(), WizardError> {
        let name = self.0.trim();
        if name.is_empty() {
            return Err(WizardError::validation("No search query provided"));
        }
        state.notify(Notice::success(format!("Searching Reddit for: {}", name)));
        navigator::navigate(state, Route::threads(name));
        Ok(())
    }
}

// Threads

pub struct ToggleThread(pub String);
impl Command for ToggleThread {
    fn execute(&self, state: &mut AppState) -> Result<(), WizardError> {
        state.ui.threads.selection.toggle(&self.0);
        Ok(())
    }
}

pub struct ProceedFromThreads;
impl Command for ProceedFromThreads {
    fn execute(&self, state: &mut AppState) -> Result<(), WizardError> {
        let page = &state.ui.threads;
        let chosen: Vec<_> = page
            .posts
            .iter()
            .filter(|post| page.selection.is_selected(&post.id))
            .cloned()
            .collect();
        if chosen.is_empty() {
            return Err(WizardError::empty_selection("Please select at least one thread"));
        }

        let query = page.query.clone().unwrap_or_default();
        let count = chosen.len();

        let config = chosen.iter().map(|post| ThreadConfig::for_thread(&post.id)).collect();
        state.flow.set_thread_config(config);
        state.flow.set_selected_threads(chosen.clone());
        state.flow.set_analysis_results(None);

        state.requests.submit(RequestKind::Analysis, &query, ApiRequest::AnalyzeThreads { threads: chosen });
        state.ui.options = Default::default();
        state.ui.options.analysis_status = PageStatus::Loading;

        state.notify(Notice::success(format!("{} thread{} configured!", count, plural(count))));
        navigator::navigate(state, Route::Options);
        Ok(())
    }
}

pub struct RetryThreads;
impl Command for RetryThreads {
    fn execute(&self, state: &mut AppState) -> Result<(), WizardError> {
        navigator::refetch_threads(state);
        Ok(())
    }
}

// Options

pub struct SelectPlan(pub String);
impl Command for SelectPlan {
    fn execute(&self, state: &mut AppState) -> Result<(), WizardError> {
        if !PLANS.iter().any(|plan| plan.id == self.0) {
            return Err(WizardError::validation(format!("Unknown plan: {}", self.0)));
        }
        let active = state.ui.options.plans.toggle(&self.0);
        state.flow.set_option(active.then_some(self.0.as_str()));
        if active {
            state.notify(Notice::success("Plan selected successfully!"));
        }
        Ok(())
    }
}

pub struct ConfirmPlan;
impl Command for ConfirmPlan {
    fn execute(&self, state: &mut AppState) -> Result<(), WizardError> {
        if state.flow.state().selected_option.is_none() {
            return Err(WizardError::empty_selection("Please choose a plan"));
        }
        navigator::start_over(state);
        state.notify(Notice::success("All set! Starting a new search."));
        Ok(())
    }
}

// Landing page

pub struct OpenLandingPageCreation;
impl Command for OpenLandingPageCreation {
    fn execute(&self, state: &mut AppState) -> Result<(), WizardError> {
        navigator::navigate(state, Route::LandingPageCreation);
        Ok(())
    }
}

/// Picks one of the top opportunities by its rank.
pub struct SelectOpportunity(pub u32);
impl Command for SelectOpportunity {
    fn execute(&self, state: &mut AppState) -> Result<(), WizardError> {
        let name = state
            .flow
            .state()
            .analysis_results
            .as_ref()
            .and_then(|report| report.top_opportunities().iter().find(|o| o.rank == self.0))
            .map(|o| o.solution_name.clone())
            .ok_or_else(|| WizardError::validation("That opportunity is no longer available"))?;

        if state.ui.landing.opportunities.toggle(&self.0.to_string()) {
            state.notify(Notice::success(format!("Selected: {}", name)));
        }
        Ok(())
    }
}

pub struct CreateLandingPage;
impl Command for CreateLandingPage {
    fn execute(&self, state: &mut AppState) -> Result<(), WizardError> {
        if state.ui.landing.opportunities.active().is_none() {
            return Err(WizardError::empty_selection("Please select an opportunity first"));
        }
        navigator::start_over(state);
        state.notify(Notice::success("Creating your landing page..."));
        Ok(())
    }
}

// Navigation

pub struct GoBack;
impl Command for GoBack {
    fn execute(&self, state: &mut AppState) -> Result<(), WizardError> {
        navigator::go_back(state);
        Ok(())
    }
}

pub struct StartOver;
impl Command for StartOver {
    fn execute(&self, state: &mut AppState) -> Result<(), WizardError> {
        navigator::start_over(state);
        Ok(())
    }
}

pub struct Navigate(pub Route);
impl Command for Navigate {
    fn execute(&self, state: &mut AppState) -> Result<(), WizardError> {
        navigator::navigate(state, self.0.clone());
        Ok(())
    }
}

/// Breadcrumb click: back along the trail if the route is on it.
pub struct JumpTo(pub Route);
impl Command for JumpTo {
    fn execute(&self, state: &mut AppState) -> Result<(), WizardError> {
        navigator::jump_to(state, self.0.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AnalysisResult, Post, TopicCategory};
    use crate::config::AppConfig;
    use crate::state::session_state::SessionCache;
    use pretty_assertions::assert_eq;

    fn state() -> AppState {
        AppState::new(AppConfig::default(), SessionCache::in_memory())
    }

    fn post(id: &str) -> Post {
        Post { id: id.to_string(), title: format!("Post {}", id), ..Post::default() }
    }

    fn on_threads_page(posts: &[&str]) -> AppState {
        let mut state = state();
        state.route = Route::threads("keto");
        state.ui.threads.query = Some("keto".into());
        state.ui.threads.posts = posts.iter().map(|id| post(id)).collect();
        state.ui.threads.status = PageStatus::Ready;
        state
    }

    #[test]
    fn blank_search_is_rejected_before_any_request() {
        let mut state = state();
        state.ui.search.input = "   \t".into();

        let err = SubmitSearch.execute(&mut state).unwrap_err();
        assert_eq!(err, WizardError::validation("Please enter a search query"));
        assert!(state.requests.outbox().is_empty());
        assert_eq!(state.ui.search.status, PageStatus::Idle);
    }

    #[test]
    fn search_queues_one_generation_request() {
        let mut state = state();
        state.ui.search.input = "  sleep apps ".into();
        SubmitSearch.execute(&mut state).unwrap();

        assert_eq!(state.requests.pending_query(RequestKind::Ideas), Some("sleep apps"));
        assert_eq!(state.ui.search.status, PageStatus::Loading);
    }

    #[test]
    fn trending_topic_sets_market_and_searches() {
        let mut state = state();
        let topic = TrendingTopic {
            id: "t-1".into(),
            category: TopicCategory::Wealth,
            trend: "+12%".into(),
            title: "Side hustles".into(),
        };
        ExploreTrendingTopic(topic).execute(&mut state).unwrap();

        assert_eq!(state.flow.state().market_id.as_deref(), Some("2"));
        assert_eq!(state.requests.pending_query(RequestKind::Ideas), Some("Side hustles"));
    }

    #[test]
    fn results_need_a_selection() {
        let mut state = state();
        state.route = Route::results("sleep");
        let err = ProceedFromResults.execute(&mut state).unwrap_err();
        assert_eq!(err, WizardError::empty_selection("Please select at least one item"));
        assert_eq!(state.route, Route::results("sleep"));
    }

    #[test]
    fn results_join_selected_names_into_thread_query() {
        let mut state = state();
        state.route = Route::results("sleep");
        ToggleResultsCategory("Tracking".into()).execute(&mut state).unwrap();
        ToggleResultsSubTopic { category: "Tracking".into(), sub_topic: "Apps".into() }
            .execute(&mut state)
            .unwrap();

        ProceedFromResults.execute(&mut state).unwrap();
        assert_eq!(state.route, Route::threads("Tracking, Apps"));
        assert!(state.flow.state().selected_cards.contains("Apps"));
    }

    #[test]
    fn expanding_does_not_select() {
        let mut state = state();
        state.route = Route::results("sleep");
        ToggleExpanded("Tracking".into()).execute(&mut state).unwrap();

        assert!(state.ui.results.categories.is_expanded("Tracking"));
        assert!(!state.ui.results.categories.is_selected("Tracking"));
    }

    #[test]
    fn zero_threads_block_and_keep_config() {
        let mut state = on_threads_page(&["a", "b"]);
        state.flow.set_thread_config(vec![ThreadConfig::for_thread("old")]);
        let before = state.flow.state().thread_config.clone();

        let err = ProceedFromThreads.execute(&mut state).unwrap_err();
        assert_eq!(err, WizardError::empty_selection("Please select at least one thread"));
        assert_eq!(state.flow.state().thread_config, before);
        assert_eq!(state.route, Route::threads("keto"));
    }

    #[test]
    fn proceeding_from_threads_requests_analysis() {
        let mut state = on_threads_page(&["a", "b", "c"]);
        ToggleThread("a".into()).execute(&mut state).unwrap();
        ToggleThread("c".into()).execute(&mut state).unwrap();
        state.flow.set_analysis_results(Some(AnalysisResult::default()));

        ProceedFromThreads.execute(&mut state).unwrap();
        let flow = state.flow.state();
        assert_eq!(flow.thread_config.len(), 2);
        assert_eq!(flow.selected_threads.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(), ["a", "c"]);
        assert!(flow.analysis_results.is_none());
        assert!(state.requests.is_pending(RequestKind::Analysis));
        assert_eq!(state.route, Route::Options);
        assert_eq!(state.ui.options.analysis_status, PageStatus::Loading);
    }

    #[test]
    fn plans_are_single_select() {
        let mut state = state();
        SelectPlan("option-1".into()).execute(&mut state).unwrap();
        SelectPlan("option-2".into()).execute(&mut state).unwrap();
        assert_eq!(state.flow.state().selected_option.as_deref(), Some("option-2"));

        SelectPlan("option-2".into()).execute(&mut state).unwrap();
        assert_eq!(state.flow.state().selected_option, None);
        assert!(SelectPlan("option-9".into()).execute(&mut state).is_err());
    }

    #[test]
    fn confirm_requires_plan_then_resets() {
        let mut state = state();
        state.route = Route::Options;
        assert!(ConfirmPlan.execute(&mut state).is_err());

        state.flow.set_market("1");
        SelectPlan("option-3".into()).execute(&mut state).unwrap();
        ConfirmPlan.execute(&mut state).unwrap();
        assert_eq!(state.route, Route::Search);
        assert_eq!(state.flow.state(), &Default::default());
    }

    #[test]
    fn landing_page_needs_an_opportunity() {
        let mut state = state();
        state.route = Route::LandingPageCreation;
        let err = CreateLandingPage.execute(&mut state).unwrap_err();
        assert_eq!(err, WizardError::empty_selection("Please select an opportunity first"));
        assert!(SelectOpportunity(1).execute(&mut state).is_err());
    }

    #[test]
    fn category_proceed_uses_category_name() {
        let mut state = state();
        state.session.store("sleep", r#"{"Health": {"Sleep": {"Tracking": {}}}}"#);
        Navigate(Route::categories(Some("sleep"))).execute(&mut state).unwrap();
        assert!(ProceedFromCategories.execute(&mut state).is_err());

        SelectCategory("health-0".into()).execute(&mut state).unwrap();
        ProceedFromCategories.execute(&mut state).unwrap();
        assert_eq!(state.route, Route::threads("Sleep"));
        assert!(state.flow.state().selected_cards.contains("health-0"));
    }

    #[test]
    fn browse_categories_after_restart_on_results() {
        let mut state = state();
        state.session.store("sleep", r#"{"Health": {"Sleep": {"Tracking": {}}}}"#);
        Navigate(Route::from_path("/results?q=sleep")).execute(&mut state).unwrap();

        BrowseCategories.execute(&mut state).unwrap();
        assert_eq!(state.route, Route::categories(Some("sleep")));
        assert_eq!(state.ui.categories.status, PageStatus::Ready);
    }

    #[test]
    fn browse_categories_reads_the_results_route() {
        let mut state = state();
        state.session.store("sleep", r#"{"Health": {"Sleep": {"Tracking": {}}}}"#);
        state.route = Route::results("sleep");

        BrowseCategories.execute(&mut state).unwrap();
        assert_eq!(state.route, Route::categories(Some("sleep")));
        assert_eq!(state.ui.categories.status, PageStatus::Ready);
    }
}
