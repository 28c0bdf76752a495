// src/state/mod.rs
use crate::config::AppConfig;
use crate::state::flow_state::FlowStore;
use crate::state::requests::RequestTracker;
use crate::state::session_state::SessionCache;
use crate::state::ui_state::{Notice, UiState};
use crate::wizard::Route;

pub mod flow_state;
pub mod requests;
pub mod selection;
pub mod session_state;
pub mod ui_state;

// Core application state
#[derive(Debug)]
pub struct AppState {
    // Where the user is
    pub route: Route,
    pub history: Vec<Route>,

    // Wizard progress and the taxonomy cache
    pub flow: FlowStore,
    pub session: SessionCache,

    // Per-page view state
    pub ui: UiState,

    pub requests: RequestTracker,
    pub config: AppConfig,

    // Output channel for toasts; drained by the app each frame
    pub notices: Vec<Notice>,
}

impl AppState {
    pub fn new(config: AppConfig, session: SessionCache) -> Self {
        Self {
            route: Route::Search,
            history: Vec::new(),
            flow: FlowStore::new(),
            session,
            ui: UiState::default(),
            requests: RequestTracker::default(),
            config,
            notices: Vec::new(),
        }
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
