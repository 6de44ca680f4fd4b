// Library entry so integration tests and external tools can reference internal modules.
// Re-export the same modules used by the binary (`main.rs`).
pub mod bible;
pub mod commands;
pub mod config;
pub mod constants;
pub mod database;
pub mod handler;
pub mod model;
pub mod reddit;
pub mod services;

pub use model::AppState;
