pub mod api;
pub mod cli;
pub mod commands;
pub mod configuration;
mod context;
pub mod scene_session;

pub use context::AppContext;
