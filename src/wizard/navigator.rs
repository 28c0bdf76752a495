// src/wizard/navigator.rs
use tracing::info;

use crate::api::{validate_thread_query, ApiRequest};
use crate::state::requests::RequestKind;
use crate::state::ui_state::{Notice, PageStatus};
use crate::state::AppState;
use crate::taxonomy::{flatten, results_view, Taxonomy};

use super::Route;

const NO_RESULTS: &str = "No search results found. Please try searching again.";
const LOAD_FAILED: &str = "Failed to load search results";

/// Moves forward to `route`, remembering where we came from.
pub fn navigate(state: &mut AppState, route: Route) {
    if state.route == route {
        enter(state);
        return;
    }
    leave(state);
    info!("navigate {} -> {}", state.route, route);
    let previous = std::mem::replace(&mut state.route, route);
    state.history.push(previous);
    enter(state);
}

/// Back never validates and never clears accumulated state.
pub fn go_back(state: &mut AppState) {
    let target = match state.history.pop() {
        Some(route) => route,
        None => match fallback_back(state) {
            Some(route) => route,
            None => return,
        },
    };
    leave(state);
    info!("back {} -> {}", state.route, target);
    state.route = target;
    enter(state);
}

/// Returns to a route already on the trail and drops everything after it.
pub fn jump_to(state: &mut AppState, route: Route) {
    let Some(index) = state.history.iter().position(|r| *r == route) else {
        navigate(state, route);
        return;
    };
    leave(state);
    info!("jump {} -> {}", state.route, route);
    state.history.truncate(index);
    state.route = route;
    enter(state);
}

fn fallback_back(state: &AppState) -> Option<Route> {
    let flow = state.flow.state();
    match &state.route {
        Route::Search => None,
        Route::Categories { .. } | Route::Results { .. } | Route::Settings | Route::NotFound { .. } => {
            Some(Route::Search)
        }
        Route::Threads { .. } => Some(Route::Results { query: flow.search_query.clone() }),
        Route::Options => Some(Route::Threads { query: state.ui.threads.query.clone() }),
        Route::LandingPageCreation => Some(Route::Options),
    }
}

/// Completion or "start over": the one place the flow is reset.
pub fn start_over(state: &mut AppState) {
    info!("starting over from {}", state.route);
    state.flow.reset();
    state.requests.clear();
    state.ui.reset_pages();
    state.history.clear();
    state.route = Route::Search;
    enter(state);
}

fn leave(state: &mut AppState) {
    let kinds: &[RequestKind] = match state.route {
        Route::Search => &[RequestKind::Ideas, RequestKind::Trending],
        Route::Threads { .. } => &[RequestKind::Threads],
        Route::Options => &[RequestKind::Analysis],
        _ => &[],
    };
    for kind in kinds {
        state.requests.abandon(*kind);
    }

    // An abandoned fetch leaves nothing behind to show
    if let Route::Threads { .. } = state.route {
        if state.ui.threads.status == PageStatus::Loading {
            state.ui.threads.status = PageStatus::Idle;
        }
    }
    if state.route == Route::Options && state.ui.options.analysis_status == PageStatus::Loading {
        state.ui.options.analysis_status = PageStatus::Idle;
    }
    if state.route == Route::Search {
        if state.ui.search.status == PageStatus::Loading {
            state.ui.search.status = PageStatus::Idle;
        }
        if state.ui.search.trending_status == PageStatus::Loading {
            state.ui.search.trending_status = PageStatus::Idle;
        }
    }
}

/// Loads whatever the current route needs.
pub fn enter(state: &mut AppState) {
    match state.route.clone() {
        Route::Search => enter_search(state),
        Route::Results { query } => enter_results(state, query),
        Route::Categories { query, .. } => enter_categories(state, query),
        Route::Threads { query } => enter_threads(state, query),
        Route::Options | Route::LandingPageCreation | Route::Settings | Route::NotFound { .. } => {}
    }
}

fn enter_search(state: &mut AppState) {
    if state.ui.search.trending_status == PageStatus::Idle {
        state.ui.search.trending_status = PageStatus::Loading;
        state.requests.submit(RequestKind::Trending, "", ApiRequest::Trending);
    }
}

// Cache hit for this exact query, or the "no data" path
fn cached_taxonomy(state: &mut AppState, query: Option<&str>) -> Result<Taxonomy, String> {
    let Some(raw) = state.session.lookup(query).map(str::to_string) else {
        state.notify(Notice::warning(NO_RESULTS));
        return Err(NO_RESULTS.to_string());
    };
    Taxonomy::from_json_str(&raw).map_err(|e| {
        tracing::error!("cached taxonomy unreadable: {}", e);
        state.notify(Notice::error(LOAD_FAILED));
        LOAD_FAILED.to_string()
    })
}

fn enter_results(state: &mut AppState, query: Option<String>) {
    let page = &state.ui.results;
    if page.query == query && page.status.is_settled() {
        return;
    }

    let status = match cached_taxonomy(state, query.as_deref()) {
        Ok(taxonomy) => {
            if let Some(q) = query.as_deref() {
                state.flow.set_search_query(q);
            }
            let view = results_view(&taxonomy);
            let status = if view.is_some() { PageStatus::Ready } else { PageStatus::Empty };
            state.ui.results = Default::default();
            state.ui.results.view = view;
            status
        }
        Err(message) => {
            state.ui.results = Default::default();
            PageStatus::Failed(message)
        }
    };
    state.ui.results.query = query;
    state.ui.results.status = status;
}

fn enter_categories(state: &mut AppState, query: Option<String>) {
    let page = &state.ui.categories;
    if page.query == query && page.status.is_settled() {
        return;
    }

    state.ui.categories = Default::default();
    state.ui.categories.status = match cached_taxonomy(state, query.as_deref()) {
        Ok(taxonomy) => {
            if let Some(q) = query.as_deref() {
                state.flow.set_search_query(q);
            }
            let categories = flatten(&taxonomy);
            let status = if categories.is_empty() { PageStatus::Empty } else { PageStatus::Ready };
            state.ui.categories.categories = categories;
            status
        }
        Err(message) => PageStatus::Failed(message),
    };
    state.ui.categories.query = query;
}

fn enter_threads(state: &mut AppState, query: Option<String>) {
    let page = &state.ui.threads;
    let same_query = page.query == query;
    if same_query && page.status.is_settled() {
        return;
    }
    if same_query && page.status == PageStatus::Loading && state.requests.is_pending(RequestKind::Threads) {
        return;
    }

    state.ui.threads = Default::default();
    state.ui.threads.query = query.clone();

    let validated = match query {
        Some(q) => validate_thread_query(&q, state.config.research.max_query_len),
        None => Err(crate::error::WizardError::validation("No search query provided")),
    };
    match validated {
        Ok(q) => {
            state.ui.threads.status = PageStatus::Loading;
            state.requests.submit(RequestKind::Threads, &q, ApiRequest::SearchThreads { query: q.clone() });
            state.notify(Notice::info("Searching Reddit..."));
        }
        Err(e) => {
            state.notify(Notice::from_error(&e));
            state.ui.threads.status = PageStatus::Failed(e.to_string());
        }
    }
}

/// Forces the thread search to run again for the current query.
pub fn refetch_threads(state: &mut AppState) {
    state.ui.threads.status = PageStatus::Idle;
    state.ui.threads.query = None;
    if let Route::Threads { query } = state.route.clone() {
        enter_threads(state, query);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::state::session_state::SessionCache;

    fn state_with_cache(query: &str, raw: &str) -> AppState {
        let mut session = SessionCache::in_memory();
        session.store(query, raw);
        AppState::new(AppConfig::default(), session)
    }

    #[test]
    fn results_page_loads_matching_cache() {
        let mut state = state_with_cache("sleep", r#"{"Health": {"Sleep": {"Tracking": {"Apps": {}}}}}"#);
        navigate(&mut state, Route::results("sleep"));

        assert_eq!(state.ui.results.status, PageStatus::Ready);
        assert_eq!(state.ui.results.view.as_ref().unwrap().child_topic, "Sleep");
    }

    #[test]
    fn mismatched_cache_enters_no_data_path() {
        let mut state = state_with_cache("sleep", r#"{"Health": {"Sleep": {}}}"#);
        navigate(&mut state, Route::results("keto"));

        assert!(matches!(state.ui.results.status, PageStatus::Failed(_)));
        assert!(state.ui.results.view.is_none());
        assert!(!state.notices.is_empty());
    }

    #[test]
    fn categories_without_query_never_use_stale_payload() {
        let mut state = state_with_cache("sleep", r#"{"Health": {"Sleep": {}}}"#);
        navigate(&mut state, Route::Categories { query: None, category: Some("Wealth".into()) });

        assert!(matches!(state.ui.categories.status, PageStatus::Failed(_)));
        assert!(state.ui.categories.categories.is_empty());
    }

    #[test]
    fn empty_taxonomy_is_an_empty_state_not_an_error() {
        let mut state = state_with_cache("nothing", "{}");
        navigate(&mut state, Route::categories(Some("nothing")));
        assert_eq!(state.ui.categories.status, PageStatus::Empty);
    }

    #[test]
    fn corrupt_cache_is_a_load_failure() {
        let mut state = state_with_cache("sleep", "{broken");
        navigate(&mut state, Route::categories(Some("sleep")));
        assert_eq!(state.ui.categories.status, PageStatus::Failed(LOAD_FAILED.to_string()));
    }

    #[test]
    fn entering_threads_queues_one_search() {
        let mut state = AppState::new(AppConfig::default(), SessionCache::in_memory());
        navigate(&mut state, Route::threads("keto"));

        assert_eq!(state.ui.threads.status, PageStatus::Loading);
        assert_eq!(state.requests.pending_query(RequestKind::Threads), Some("keto"));
        let queued: Vec<_> = state
            .requests
            .outbox()
            .iter()
            .filter(|(t, _)| t.kind == RequestKind::Threads)
            .collect();
        assert_eq!(queued.len(), 1);
    }

    #[test]
    fn threads_without_query_fail_locally() {
        let mut state = AppState::new(AppConfig::default(), SessionCache::in_memory());
        navigate(&mut state, Route::Threads { query: None });
        assert!(matches!(state.ui.threads.status, PageStatus::Failed(_)));
        assert!(!state.requests.is_pending(RequestKind::Threads));
    }

    #[test]
    fn back_keeps_loaded_pages() {
        let mut state = state_with_cache("sleep", r#"{"Health": {"Sleep": {"Tracking": {}}}}"#);
        navigate(&mut state, Route::results("sleep"));
        state.ui.results.categories.toggle("Tracking");
        navigate(&mut state, Route::threads("Tracking"));

        go_back(&mut state);
        assert_eq!(state.route, Route::results("sleep"));
        assert!(state.ui.results.categories.is_selected("Tracking"));
        // Leaving threads abandoned its search
        assert!(!state.requests.is_pending(RequestKind::Threads));
    }

    #[test]
    fn cache_hit_restores_search_query() {
        let mut state = state_with_cache("sleep", r#"{"Health": {"Sleep": {}}}"#);
        navigate(&mut state, Route::from_path("/results?q=sleep"));
        assert_eq!(state.flow.state().search_query.as_deref(), Some("sleep"));
    }

    #[test]
    fn jumping_back_along_the_trail_truncates_history() {
        let mut state = state_with_cache("sleep", r#"{"Health": {"Sleep": {"Tracking": {}}}}"#);
        navigate(&mut state, Route::results("sleep"));
        navigate(&mut state, Route::threads("Tracking"));
        assert_eq!(state.history, vec![Route::Search, Route::results("sleep")]);

        for _ in 0..3 {
            jump_to(&mut state, Route::results("sleep"));
            assert_eq!(state.history, vec![Route::Search]);
            navigate(&mut state, Route::threads("Tracking"));
        }
        assert_eq!(state.history.len(), 2);

        jump_to(&mut state, Route::Search);
        assert_eq!(state.route, Route::Search);
        assert!(state.history.is_empty());
        assert!(!state.requests.is_pending(RequestKind::Threads));
    }

    #[test]
    fn back_without_history_uses_sequence() {
        let mut state = AppState::new(AppConfig::default(), SessionCache::in_memory());
        state.route = Route::LandingPageCreation;
        go_back(&mut state);
        assert_eq!(state.route, Route::Options);
    }

    #[test]
    fn start_over_resets_flow_and_history() {
        let mut state = state_with_cache("sleep", r#"{"Health": {"Sleep": {}}}"#);
        state.flow.set_market("1");
        navigate(&mut state, Route::results("sleep"));

        start_over(&mut state);
        assert_eq!(state.route, Route::Search);
        assert!(state.history.is_empty());
        assert_eq!(state.flow.state(), &Default::default());
    }
}
