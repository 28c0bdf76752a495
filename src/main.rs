// src/main.rs
use std::sync::Arc;

use anyhow::Result;
use eframe::egui;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod app;
mod config;
mod error;
mod file;
mod state;
mod taxonomy;
mod ui;
mod wizard;

use api::{ApiWorker, HttpResearchApi};
use app::ScoutApp;
use config::AppConfig;
use state::session_state::SessionCache;
use state::AppState;
use wizard::Route;

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(format!("Could not read configuration: {:#}", e))),
    };
    init_logging(&config.log_filter);
    if let Some(e) = &config_error {
        warn!("{}; using defaults", e);
    }

    // Optional first argument: a route such as "/results?q=sleep"
    let start = std::env::args().nth(1).map(|path| Route::from_path(&path)).unwrap_or(Route::Search);
    info!("starting at {}", start);

    let api = HttpResearchApi::new(config.api.clone(), config.research.clone())?;
    let session = match SessionCache::default_path() {
        Some(path) => SessionCache::persistent(path),
        None => SessionCache::in_memory(),
    };
    let mut state = AppState::new(config, session);
    state.ui.error_message = config_error;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_title("Niche Scout"),
        ..Default::default()
    };

    eframe::run_native(
        "Niche Scout",
        options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            let worker = ApiWorker::new(Arc::new(api)).with_waker(move || ctx.request_repaint());
            Box::new(ScoutApp::new(state, worker, start))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
