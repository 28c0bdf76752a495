// src/ui/results.rs
use eframe::egui;

use super::widgets;
use crate::state::ui_state::{sub_topic_key, PageStatus};
use crate::state::AppState;
use crate::wizard::command::{
    BrowseCategories, Command, GoBack, ProceedFromResults, ToggleExpanded, ToggleResultsCategory,
    ToggleResultsSubTopic,
};
use crate::wizard::title_case;

pub fn show_results_view(ui: &mut egui::Ui, state: &AppState) -> Option<Box<dyn Command>> {
    let page = &state.ui.results;
    let view = match (&page.status, &page.view) {
        (PageStatus::Failed(message), _) => {
            return widgets::error_panel(ui, message).then(|| Box::new(GoBack) as Box<dyn Command>);
        }
        (PageStatus::Ready, Some(view)) => view,
        _ => {
            widgets::empty_panel(ui, "No results", "The search returned no market categories.");
            return ui.button("⬅ Back").clicked().then(|| Box::new(GoBack) as Box<dyn Command>);
        }
    };

    let mut command: Option<Box<dyn Command>> = None;

    if let Some(query) = &page.query {
        ui.weak(format!("Results for \"{}\"", title_case(query)));
    }
    ui.heading(format!("{} › {}", view.main_topic, view.child_topic));
    ui.horizontal(|ui| {
        ui.label("Pick the topics worth researching on Reddit.");
        if ui.link("Browse all categories").clicked() {
            command = Some(Box::new(BrowseCategories));
        }
    });
    ui.add_space(8.0);

    let footer_height = 48.0;
    egui::ScrollArea::vertical()
        .id_source("results_scroll")
        .max_height(ui.available_height() - footer_height)
        .show(ui, |ui| {
            for category in &view.categories {
                let selected = page.categories.is_selected(&category.name);
                let expanded = page.categories.is_expanded(&category.name);

                widgets::card(ui, selected, |ui| {
                    ui.horizontal(|ui| {
                        let mut checked = selected;
                        if ui.checkbox(&mut checked, egui::RichText::new(&category.name).strong()).clicked() {
                            command = Some(Box::new(ToggleResultsCategory(category.name.clone())));
                        }
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let arrow = if expanded { "▲" } else { "▼" };
                            let label = format!("{} {} topics", arrow, category.sub_topics.len());
                            if ui.small_button(label).clicked() {
                                command = Some(Box::new(ToggleExpanded(category.name.clone())));
                            }
                        });
                    });

                    if expanded {
                        ui.indent(("sub_topics", &category.name), |ui| {
                            for sub in &category.sub_topics {
                                let key = sub_topic_key(&category.name, &sub.name);
                                let mut checked = page.sub_topics.is_selected(&key);
                                if ui.checkbox(&mut checked, &sub.name).clicked() {
                                    command = Some(Box::new(ToggleResultsSubTopic {
                                        category: category.name.clone(),
                                        sub_topic: sub.name.clone(),
                                    }));
                                }
                                if !sub.children.is_empty() {
                                    ui.indent(("children", &key), |ui| {
                                        ui.weak(sub.children.join(" · "));
                                    });
                                }
                            }
                        });
                    }
                });
                ui.add_space(6.0);
            }
        });

    let count = page.categories.selected().len() + page.sub_topics.selected().len();
    let (back, next) = widgets::footer(ui, &format!("Search Reddit ({}) ➡", count), true);
    if back {
        command = Some(Box::new(GoBack));
    } else if next {
        command = Some(Box::new(ProceedFromResults));
    }

    command
}
