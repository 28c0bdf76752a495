// src/ui/widgets.rs
use std::time::Instant;

use eframe::egui;

use crate::state::ui_state::{NoticeLevel, ToastQueue};
use crate::state::AppState;
use crate::wizard::command::{Command, JumpTo};
use crate::wizard::{Route, Step};

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(99, 102, 241);

pub fn level_color(level: NoticeLevel) -> egui::Color32 {
    match level {
        NoticeLevel::Info => egui::Color32::from_rgb(59, 130, 246),
        NoticeLevel::Success => egui::Color32::from_rgb(34, 197, 94),
        NoticeLevel::Warning => egui::Color32::from_rgb(234, 179, 8),
        NoticeLevel::Error => egui::Color32::RED,
    }
}

/// Full-panel error. Returns true when "Go back" is clicked.
pub fn error_panel(ui: &mut egui::Ui, message: &str) -> bool {
    let mut back = false;
    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        ui.label(egui::RichText::new("⚠").size(40.0).color(egui::Color32::RED));
        ui.heading("Something went wrong");
        ui.label(message);
        ui.add_space(12.0);
        back = ui.button("⬅ Go back").clicked();
    });
    back
}

pub fn empty_panel(ui: &mut egui::Ui, title: &str, detail: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        ui.label(egui::RichText::new("🔍").size(40.0));
        ui.heading(title);
        ui.weak(detail);
        ui.add_space(12.0);
    });
}

pub fn loading(ui: &mut egui::Ui, message: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        ui.spinner();
        ui.label(message);
    });
}

/// A bordered, clickable card. The body is drawn by `add_contents`.
pub fn card<R>(
    ui: &mut egui::Ui,
    selected: bool,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> egui::InnerResponse<R> {
    let stroke = if selected {
        egui::Stroke::new(2.0, ACCENT)
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke
    };
    egui::Frame::group(ui.style())
        .stroke(stroke)
        .inner_margin(egui::Margin::same(10.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        })
}

pub fn breadcrumb(ui: &mut egui::Ui, state: &AppState) -> Option<Box<dyn Command>> {
    let mut command: Option<Box<dyn Command>> = None;
    ui.horizontal(|ui| {
        if ui.link("🏠 Home").clicked() {
            command = Some(Box::new(JumpTo(Route::Search)));
        }
        let trail = state
            .history
            .iter()
            .filter(|r| r.step().is_some() && **r != Route::Search)
            .chain(std::iter::once(&state.route).filter(|r| **r != Route::Search));
        for route in trail {
            ui.weak("›");
            if *route == state.route {
                ui.strong(route.breadcrumb_label());
            } else if ui.link(route.breadcrumb_label()).clicked() {
                command = Some(Box::new(JumpTo(route.clone())));
            }
        }
    });
    command
}

pub fn progress_dots(ui: &mut egui::Ui, route: &Route) {
    let Some(current) = route.step().map(|s| s.progress_index()) else {
        return;
    };
    ui.horizontal(|ui| {
        for (index, label) in Step::PROGRESS_LABELS.iter().enumerate() {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
            let color = if index <= current { ACCENT } else { ui.visuals().weak_text_color() };
            ui.painter().circle_filled(rect.center(), 5.0, color);
            if index == current {
                ui.strong(*label);
            } else {
                ui.weak(*label);
            }
            ui.add_space(6.0);
        }
    });
}

pub fn toasts(ctx: &egui::Context, queue: &ToastQueue) {
    if queue.is_empty() {
        return;
    }
    let now = Instant::now();
    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 48.0))
        .interactable(false)
        .show(ctx, |ui| {
            for toast in queue.visible() {
                if toast.expires_at <= now {
                    continue;
                }
                egui::Frame::popup(ui.style())
                    .stroke(egui::Stroke::new(1.0, level_color(toast.notice.level)))
                    .show(ui, |ui| {
                        ui.set_max_width(320.0);
                        ui.colored_label(level_color(toast.notice.level), &toast.notice.message);
                    });
                ui.add_space(6.0);
            }
        });
}

/// Back on the left, the primary action on the right.
pub fn footer(
    ui: &mut egui::Ui,
    primary: &str,
    enabled: bool,
) -> (bool, bool) {
    let mut back = false;
    let mut next = false;
    ui.add_space(12.0);
    ui.separator();
    ui.horizontal(|ui| {
        back = ui.button("⬅ Back").clicked();
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            next = ui
                .add_enabled(enabled, egui::Button::new(egui::RichText::new(primary).strong()))
                .clicked();
        });
    });
    (back, next)
}
