// src/ui/search.rs
use eframe::egui;

use super::widgets;
use crate::api::TopicCategory;
use crate::state::ui_state::PageStatus;
use crate::state::AppState;
use crate::wizard::command::{Command, ExploreTrendingTopic, SubmitSearch};

fn topic_color(category: TopicCategory) -> egui::Color32 {
    match category {
        TopicCategory::Health => egui::Color32::from_rgb(34, 197, 94),
        TopicCategory::Wealth => egui::Color32::from_rgb(234, 179, 8),
        TopicCategory::Relationships => egui::Color32::from_rgb(236, 72, 153),
    }
}

pub fn show_search_view(ui: &mut egui::Ui, state: &mut AppState) -> Option<Box<dyn Command>> {
    let mut command: Option<Box<dyn Command>> = None;
    let searching = state.ui.search.status == PageStatus::Loading;

    ui.vertical_centered(|ui| {
        ui.add_space(32.0);
        ui.heading(egui::RichText::new("Find your next niche").size(28.0));
        ui.weak("Describe a market or problem and we'll map the opportunities in it.");
        ui.add_space(16.0);
    });

    ui.horizontal(|ui| {
        let input = ui.add_enabled(
            !searching,
            egui::TextEdit::singleline(&mut state.ui.search.input)
                .hint_text("e.g. sleep tracking for shift workers")
                .desired_width(ui.available_width() - 110.0),
        );
        let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        if searching {
            ui.spinner();
            ui.label("Generating...");
        } else if ui.button("🔍 Search").clicked() || submitted {
            command = Some(Box::new(SubmitSearch));
        }
    });

    if let PageStatus::Failed(message) = &state.ui.search.status {
        ui.add_space(4.0);
        ui.colored_label(egui::Color32::RED, message);
    }

    ui.add_space(24.0);
    ui.separator();
    ui.heading("🔥 Trending topics");
    ui.add_space(8.0);

    match &state.ui.search.trending_status {
        PageStatus::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading trending topics...");
            });
        }
        PageStatus::Failed(_) | PageStatus::Empty => {
            ui.weak("No trending topics right now.");
        }
        PageStatus::Idle | PageStatus::Ready => {
            egui::ScrollArea::vertical()
                .id_source("trending_scroll")
                .show(ui, |ui| {
                    for topic in &state.ui.search.trending {
                        let response = widgets::card(ui, false, |ui| {
                            ui.horizontal(|ui| {
                                ui.colored_label(topic_color(topic.category), topic.category.label());
                                ui.strong(&topic.title);
                                if !topic.trend.is_empty() {
                                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                        ui.weak(&topic.trend);
                                    });
                                }
                            });
                        });
                        let clicked = response
                            .response
                            .interact(egui::Sense::click())
                            .on_hover_text("Explore this topic")
                            .clicked();
                        if clicked && !searching {
                            command = Some(Box::new(ExploreTrendingTopic(topic.clone())));
                        }
                        ui.add_space(4.0);
                    }
                });
        }
    }

    command
}
