// src/ui/landing.rs
use eframe::egui;

use super::widgets;
use crate::state::AppState;
use crate::wizard::command::{Command, CreateLandingPage, GoBack, SelectOpportunity};

pub fn show_landing_view(ui: &mut egui::Ui, state: &AppState) -> Option<Box<dyn Command>> {
    let mut command: Option<Box<dyn Command>> = None;

    let opportunities = state
        .flow
        .state()
        .analysis_results
        .as_ref()
        .map(|report| report.top_opportunities())
        .unwrap_or_default();

    if opportunities.is_empty() {
        widgets::empty_panel(ui, "No analysis available", "Run an analysis before creating a landing page.");
        ui.vertical_centered(|ui| {
            if ui.button("⬅ Back to options").clicked() {
                command = Some(Box::new(GoBack));
            }
        });
        return command;
    }

    ui.heading("Create a landing page");
    ui.label("Pick the opportunity the page should sell.");
    ui.add_space(8.0);

    let chosen = &state.ui.landing.opportunities;
    for opp in opportunities {
        let selected = chosen.is_selected(&opp.rank.to_string());
        let card = widgets::card(ui, selected, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(format!("#{}", opp.rank)).size(20.0).color(widgets::ACCENT));
                ui.vertical(|ui| {
                    ui.strong(&opp.solution_name);
                    egui::Grid::new(("opportunity", opp.rank)).num_columns(2).show(ui, |ui| {
                        ui.weak("Market size");
                        ui.label(&opp.market_size_potential);
                        ui.end_row();
                        ui.weak("Feasibility");
                        ui.label(&opp.implementation_feasibility);
                        ui.end_row();
                        ui.weak("Advantage");
                        ui.label(&opp.competitive_advantage);
                        ui.end_row();
                        ui.weak("Dominance");
                        ui.label(&opp.category_dominance_potential);
                        ui.end_row();
                    });
                });
            });
        });
        if card.response.interact(egui::Sense::click()).clicked() {
            command = Some(Box::new(SelectOpportunity(opp.rank)));
        }
        ui.add_space(6.0);
    }

    let (back, next) = widgets::footer(ui, "Create landing page ✔", true);
    if back {
        command = Some(Box::new(GoBack));
    } else if next {
        command = Some(Box::new(CreateLandingPage));
    }

    command
}
