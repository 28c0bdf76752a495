// src/ui/settings.rs
use eframe::egui;

use crate::config::AppConfig;
use crate::state::session_state::SessionCache;
use crate::state::AppState;
use crate::wizard::command::{Command, GoBack};

fn row(ui: &mut egui::Ui, label: &str, value: impl Into<egui::WidgetText>) {
    ui.label(label);
    ui.label(value);
    ui.end_row();
}

pub fn show_settings_view(ui: &mut egui::Ui, state: &AppState) -> Option<Box<dyn Command>> {
    let config = &state.config;
    ui.heading("Settings");
    ui.weak("Edit the config file or set NICHE_SCOUT__* variables to change these.");
    ui.add_space(8.0);

    ui.group(|ui| {
        ui.strong("Backend");
        egui::Grid::new("api_settings").num_columns(2).spacing([16.0, 4.0]).show(ui, |ui| {
            row(ui, "API base URL", config.api.base_url.as_str());
            row(ui, "Reddit base URL", config.api.reddit_base_url.as_str());
            row(ui, "Auth token", if config.api.auth_token.is_some() { "set" } else { "not set" });
            row(ui, "Request timeout", format!("{}s", config.api.crud_timeout_secs));
            row(ui, "Generation timeout", format!("{}s", config.api.generation_timeout_secs));
        });
    });
    ui.add_space(8.0);

    ui.group(|ui| {
        ui.strong("Research");
        egui::Grid::new("research_settings").num_columns(2).spacing([16.0, 4.0]).show(ui, |ui| {
            row(ui, "Model", config.research.model.as_str());
            row(ui, "Temperature", format!("{:.2}", config.research.temperature));
            row(ui, "Posts fetched", config.research.num_results.to_string());
            row(ui, "Posts kept", config.research.top_n.to_string());
        });
    });
    ui.add_space(8.0);

    ui.group(|ui| {
        ui.strong("Files");
        egui::Grid::new("file_settings").num_columns(2).spacing([16.0, 4.0]).show(ui, |ui| {
            let shown = |path: Option<std::path::PathBuf>| {
                path.map(|p| p.display().to_string()).unwrap_or_else(|| "unavailable".to_string())
            };
            row(ui, "Config file", shown(AppConfig::default_path()));
            row(ui, "Session cache", shown(SessionCache::default_path()));
            row(ui, "Log filter", config.log_filter.as_str());
        });
    });

    ui.add_space(12.0);
    if ui.button("⬅ Back").clicked() {
        return Some(Box::new(GoBack));
    }
    None
}
