// src/ui/options.rs
use eframe::egui;
use rfd::FileDialog;

use super::widgets;
use crate::api::AnalysisResult;
use crate::file;
use crate::state::ui_state::{Notice, PageStatus, PLANS};
use crate::state::AppState;
use crate::wizard::command::{Command, ConfirmPlan, GoBack, OpenLandingPageCreation, SelectPlan, StartOver};

pub fn show_options_view(ui: &mut egui::Ui, state: &mut AppState) -> Option<Box<dyn Command>> {
    // The report replaces the plan picker once it exists
    if let Some(report) = state.flow.state().analysis_results.clone() {
        return show_report(ui, state, &report);
    }

    let mut command: Option<Box<dyn Command>> = None;

    match &state.ui.options.analysis_status {
        PageStatus::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Analyzing the selected threads for pain points...");
            });
        }
        PageStatus::Failed(message) => {
            ui.colored_label(egui::Color32::RED, format!("Analysis failed: {}", message));
        }
        _ => {}
    }
    ui.add_space(8.0);

    ui.heading("Choose your plan");
    ui.add_space(8.0);

    for plan in PLANS {
        let selected = state.ui.options.plans.is_selected(plan.id);
        let card = widgets::card(ui, selected, |ui| {
            ui.horizontal(|ui| {
                ui.radio(selected, "");
                ui.vertical(|ui| {
                    ui.strong(plan.title);
                    ui.weak(plan.description);
                });
            });
        });
        if card.response.interact(egui::Sense::click()).clicked() {
            command = Some(Box::new(SelectPlan(plan.id.to_string())));
        }
        ui.add_space(6.0);
    }

    let (back, next) = widgets::footer(ui, "Confirm ✔", true);
    if back {
        command = Some(Box::new(GoBack));
    } else if next {
        command = Some(Box::new(ConfirmPlan));
    }

    command
}

fn show_report(ui: &mut egui::Ui, state: &mut AppState, report: &AnalysisResult) -> Option<Box<dyn Command>> {
    let mut command: Option<Box<dyn Command>> = None;

    ui.horizontal(|ui| {
        ui.heading("Market analysis");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("💾 Export report...").clicked() {
                export(state, report);
            }
        });
    });
    ui.weak(format!(
        "{} threads analyzed",
        state.flow.state().selected_threads.len()
    ));
    ui.add_space(8.0);

    egui::ScrollArea::vertical()
        .id_source("report_scroll")
        .max_height(ui.available_height() - 48.0)
        .show(ui, |ui| {
            ui.collapsing(format!("Pain points ({})", report.pain_points.len()), |ui| {
                for point in &report.pain_points {
                    widgets::card(ui, false, |ui| {
                        ui.horizontal(|ui| {
                            ui.strong(&point.title);
                            if let Some(severity) = &point.severity {
                                ui.weak(format!("severity: {}", severity));
                            }
                            if let Some(frequency) = point.frequency {
                                ui.weak(format!("mentions: {}", frequency));
                            }
                        });
                        if let Some(description) = &point.description {
                            ui.label(description);
                        }
                    });
                }
            });

            ui.add_space(8.0);
            let opportunities = report.opportunities();
            ui.collapsing(format!("Opportunities ({})", opportunities.len()), |ui| {
                egui::Grid::new("opportunity_grid")
                    .num_columns(5)
                    .striped(true)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        ui.strong("#");
                        ui.strong("Solution");
                        ui.strong("Market size");
                        ui.strong("Feasibility");
                        ui.strong("Advantage");
                        ui.end_row();
                        for opp in opportunities {
                            ui.label(opp.rank.to_string());
                            ui.label(&opp.solution_name);
                            ui.label(&opp.market_size_potential);
                            ui.label(&opp.implementation_feasibility);
                            ui.label(&opp.competitive_advantage);
                            ui.end_row();
                        }
                    });
            });
        });

    ui.add_space(12.0);
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button("⬅ Back").clicked() {
            command = Some(Box::new(GoBack));
        }
        if ui.button("Start over").clicked() {
            command = Some(Box::new(StartOver));
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let enabled = !report.top_opportunities().is_empty();
            if ui.add_enabled(enabled, egui::Button::new("Create landing page ➡")).clicked() {
                command = Some(Box::new(OpenLandingPageCreation));
            }
        });
    });

    command
}

fn export(state: &mut AppState, report: &AnalysisResult) {
    let dialog = FileDialog::new()
        .add_filter("JSON files", &["json"])
        .set_file_name("analysis-report.json")
        .set_title("Export Analysis Report");

    let Some(path) = dialog.save_file() else {
        return;
    };
    match file::export_report(report, &path) {
        Ok(()) => {
            tracing::info!("report exported to {}", path.display());
            state.notify(Notice::success(format!("Report saved to {}", path.display())));
        }
        Err(e) => {
            tracing::error!("report export failed: {:#}", e);
            state.notify(Notice::error(format!("Could not save report: {}", e)));
        }
    }
}
