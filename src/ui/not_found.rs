// src/ui/not_found.rs
use eframe::egui;

use crate::wizard::command::{Command, Navigate};
use crate::wizard::Route;

pub fn show_not_found_view(ui: &mut egui::Ui, path: &str) -> Option<Box<dyn Command>> {
    let mut command: Option<Box<dyn Command>> = None;
    ui.vertical_centered(|ui| {
        ui.add_space(64.0);
        ui.label(egui::RichText::new("404").size(48.0).strong());
        ui.label(format!("Nothing lives at {}", path));
        ui.add_space(12.0);
        if ui.button("🏠 Return home").clicked() {
            command = Some(Box::new(Navigate(Route::Search)));
        }
    });
    command
}
