// src/wizard/mod.rs
pub mod command;
pub mod navigator;
pub mod reply;
pub mod route;

pub use command::Command;
pub use reply::apply_reply;
pub use route::{title_case, Route, Step};
