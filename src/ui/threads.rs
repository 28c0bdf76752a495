// src/ui/threads.rs
use chrono::Utc;
use eframe::egui;

use super::widgets;
use crate::api::{Post, ThreadCategory};
use crate::state::ui_state::PageStatus;
use crate::state::AppState;
use crate::wizard::command::{Command, GoBack, ProceedFromThreads, RetryThreads, ToggleExpanded, ToggleThread};
use crate::wizard::title_case;

pub fn show_threads_view(ui: &mut egui::Ui, state: &AppState) -> Option<Box<dyn Command>> {
    let page = &state.ui.threads;
    let mut command: Option<Box<dyn Command>> = None;

    match &page.status {
        PageStatus::Idle | PageStatus::Loading => {
            widgets::loading(ui, "Searching Reddit...");
            return None;
        }
        PageStatus::Failed(message) => {
            if widgets::error_panel(ui, message) {
                return Some(Box::new(GoBack));
            }
            ui.vertical_centered(|ui| {
                if page.query.is_some() && ui.button("🔄 Try again").clicked() {
                    command = Some(Box::new(RetryThreads));
                }
            });
            return command;
        }
        PageStatus::Empty => {
            widgets::empty_panel(ui, "No Reddit posts found", "Try a broader topic or a different wording.");
            ui.vertical_centered(|ui| {
                if ui.button("⬅ Back").clicked() {
                    command = Some(Box::new(GoBack));
                }
            });
            return command;
        }
        PageStatus::Ready => {}
    }

    if let Some(query) = &page.query {
        ui.heading(format!("Reddit threads: {}", title_case(query)));
    }
    ui.label("Select the conversations to analyze for pain points.");
    ui.add_space(8.0);

    let now = Utc::now();
    let categorized: Vec<(ThreadCategory, &Post)> = page
        .posts
        .iter()
        .enumerate()
        .map(|(index, post)| (post.category(index), post))
        .collect();

    egui::ScrollArea::vertical()
        .id_source("threads_scroll")
        .max_height(ui.available_height() - 48.0)
        .show(ui, |ui| {
            for group in ThreadCategory::ALL {
                let posts: Vec<&Post> = categorized
                    .iter()
                    .filter(|(category, _)| *category == group)
                    .map(|(_, post)| *post)
                    .collect();
                if posts.is_empty() {
                    continue;
                }

                ui.add_space(4.0);
                ui.strong(format!("{} ({})", group.label(), posts.len()));
                ui.add_space(4.0);

                for post in posts {
                    let selected = page.selection.is_selected(&post.id);
                    let expanded = page.selection.is_expanded(&post.id);
                    widgets::card(ui, selected, |ui| {
                        ui.horizontal(|ui| {
                            let mut checked = selected;
                            if ui.checkbox(&mut checked, "").clicked() {
                                command = Some(Box::new(ToggleThread(post.id.clone())));
                            }
                            ui.vertical(|ui| {
                                ui.strong(&post.title);
                                ui.horizontal(|ui| {
                                    ui.weak(format!("r/{}", post.subreddit));
                                    ui.weak(format!("⬆ {}", post.upvotes));
                                    ui.weak(format!("💬 {}", post.comments));
                                    ui.weak(post.time_ago(now));
                                    if !post.url.is_empty() {
                                        ui.hyperlink_to("Open", &post.url);
                                    }
                                });
                            });
                        });
                        if !post.preview.is_empty() {
                            let label = if expanded { "Hide preview" } else { "Show preview" };
                            if ui.small_button(label).clicked() {
                                command = Some(Box::new(ToggleExpanded(post.id.clone())));
                            }
                            if expanded {
                                ui.label(&post.preview);
                            }
                        }
                    });
                    ui.add_space(4.0);
                }
            }
        });

    let count = page.selection.selected().len();
    let (back, next) = widgets::footer(ui, &format!("Analyze {} thread(s) ➡", count), true);
    if back {
        command = Some(Box::new(GoBack));
    } else if next {
        command = Some(Box::new(ProceedFromThreads));
    }

    command
}
