// src/ui/mod.rs
pub mod categories;
pub mod landing;
pub mod not_found;
pub mod options;
pub mod results;
pub mod search;
pub mod settings;
pub mod threads;
pub mod widgets;
