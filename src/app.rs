// src/app.rs
use std::time::{Duration, Instant};

use eframe::egui;
use tracing::warn;

use crate::api::ApiWorker;
use crate::state::ui_state::Notice;
use crate::state::AppState;
use crate::ui;
use crate::wizard::command::{Command, GoBack, Navigate, StartOver};
use crate::wizard::{apply_reply, navigator, Route};

pub struct ScoutApp {
    state: AppState,
    worker: ApiWorker,
}

impl ScoutApp {
    pub fn new(mut state: AppState, worker: ApiWorker, start: Route) -> Self {
        navigator::navigate(&mut state, start);
        Self { state, worker }
    }

    fn show_menu(&mut self, ui: &mut egui::Ui) -> Option<Box<dyn Command>> {
        let mut command: Option<Box<dyn Command>> = None;
        egui::menu::bar(ui, |ui| {
            ui.menu_button("Wizard", |ui| {
                if ui.button("New Search").clicked() {
                    command = Some(Box::new(StartOver));
                    ui.close_menu();
                }
                if ui.add_enabled(self.state.route != Route::Search, egui::Button::new("Back")).clicked() {
                    command = Some(Box::new(GoBack));
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Settings").clicked() {
                    command = Some(Box::new(Navigate(Route::Settings)));
                    ui.close_menu();
                }
            });

            ui.separator();
            if let Some(breadcrumb) = ui::widgets::breadcrumb(ui, &self.state) {
                command = Some(breadcrumb);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui::widgets::progress_dots(ui, &self.state.route);
            });
        });
        command
    }

    fn show_page(&mut self, ui: &mut egui::Ui) -> Option<Box<dyn Command>> {
        let state = &mut self.state;
        match state.route.clone() {
            Route::Search => ui::search::show_search_view(ui, state),
            Route::Results { .. } => ui::results::show_results_view(ui, state),
            Route::Categories { .. } => ui::categories::show_categories_view(ui, state),
            Route::Threads { .. } => ui::threads::show_threads_view(ui, state),
            Route::Options => ui::options::show_options_view(ui, state),
            Route::LandingPageCreation => ui::landing::show_landing_view(ui, state),
            Route::Settings => ui::settings::show_settings_view(ui, state),
            Route::NotFound { path } => ui::not_found::show_not_found_view(ui, &path),
        }
    }

    fn execute(&mut self, command: Box<dyn Command>) {
        if let Err(e) = command.execute(&mut self.state) {
            warn!("command rejected on {}: {}", self.state.route, e);
            self.state.notify(Notice::from_error(&e));
        }
    }

    // Replies in, requests out
    fn pump(&mut self) {
        for reply in self.worker.poll() {
            apply_reply(&mut self.state, reply);
        }
        for (ticket, request) in self.state.requests.drain_outbox() {
            self.worker.dispatch(ticket, request);
        }
    }

    fn flush_notices(&mut self) {
        let now = Instant::now();
        for notice in self.state.take_notices() {
            self.state.ui.toasts.push(notice, now);
        }
        self.state.ui.toasts.prune(now);
    }
}

impl eframe::App for ScoutApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.pump();

        let mut commands = Vec::new();
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            commands.extend(self.show_menu(ui));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            commands.extend(self.show_page(ui));
        });

        for command in commands {
            self.execute(command);
        }
        self.pump();
        self.flush_notices();

        // Show error modal if needed
        let error_msg = self.state.ui.error_message.clone();
        if let Some(error) = error_msg {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.state.ui.error_message = None;
                    }
                });
        }

        ui::widgets::toasts(ctx, &self.state.ui.toasts);
        if !self.state.ui.toasts.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
