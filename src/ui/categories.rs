// src/ui/categories.rs
use eframe::egui;

use super::widgets;
use crate::state::ui_state::PageStatus;
use crate::state::AppState;
use crate::taxonomy::NicheLevel;
use crate::wizard::command::{Command, ExploreNiche, GoBack, ProceedFromCategories, SelectCategory, ToggleExpanded};
use crate::wizard::Route;

pub fn show_categories_view(ui: &mut egui::Ui, state: &AppState) -> Option<Box<dyn Command>> {
    let page = &state.ui.categories;
    match &page.status {
        PageStatus::Failed(message) => {
            return widgets::error_panel(ui, message).then(|| Box::new(GoBack) as Box<dyn Command>);
        }
        PageStatus::Empty | PageStatus::Idle | PageStatus::Loading => {
            widgets::empty_panel(ui, "No categories", "This search did not produce any categories.");
            return ui.button("⬅ Back").clicked().then(|| Box::new(GoBack) as Box<dyn Command>);
        }
        PageStatus::Ready => {}
    }

    let mut command: Option<Box<dyn Command>> = None;

    let heading = match &state.route {
        Route::Categories { category: Some(category), .. } => format!("{} categories", category),
        _ => "Categories".to_string(),
    };
    ui.heading(heading);
    ui.label("Choose one category, or jump straight into a sub-category or niche.");
    ui.add_space(8.0);

    egui::ScrollArea::vertical()
        .id_source("categories_scroll")
        .max_height(ui.available_height() - 48.0)
        .show(ui, |ui| {
            for category in &page.categories {
                let selected = page.cards.is_selected(&category.id);
                let expanded = page.cards.is_expanded(&category.id);

                let card = widgets::card(ui, selected, |ui| {
                    ui.horizontal(|ui| {
                        if ui.selectable_label(selected, egui::RichText::new(&category.name).strong()).clicked() {
                            command = Some(Box::new(SelectCategory(category.id.clone())));
                        }
                        ui.weak(format!("{} sub-categories", category.subcategories.len()));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button(if expanded { "▲" } else { "▼" }).clicked() {
                                command = Some(Box::new(ToggleExpanded(category.id.clone())));
                            }
                        });
                    });

                    if !expanded {
                        return;
                    }
                    for sub in &category.subcategories {
                        ui.horizontal(|ui| {
                            ui.label(&sub.name);
                            if ui.small_button("Explore").clicked() {
                                command = Some(Box::new(ExploreNiche(sub.name.clone())));
                            }
                        });
                        for niche in &sub.sub_niches {
                            let indent = match niche.level {
                                NicheLevel::Niche => 16.0,
                                NicheLevel::SubNiche => 32.0,
                            };
                            ui.horizontal(|ui| {
                                ui.add_space(indent);
                                if ui.link(&niche.name).clicked() {
                                    command = Some(Box::new(ExploreNiche(niche.name.clone())));
                                }
                                if let Some(trend) = &niche.trend {
                                    ui.weak(trend);
                                }
                            });
                        }
                    }
                });
                if command.is_none() && card.response.interact(egui::Sense::click()).clicked() {
                    command = Some(Box::new(SelectCategory(category.id.clone())));
                }
                ui.add_space(6.0);
            }
        });

    let (back, next) = widgets::footer(ui, "Search Reddit ➡", true);
    if back {
        command = Some(Box::new(GoBack));
    } else if next {
        command = Some(Box::new(ProceedFromCategories));
    }

    command
}
