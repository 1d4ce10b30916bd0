// Module declarations
pub mod bootstrap;
pub mod cli_context;
pub mod client;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatting;
pub mod logging;
pub mod models;
pub mod navigation;
pub mod session;
pub mod state;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use client::{ApiClient, RequestContext};
pub use config::{Config, load_config, save_config};
pub use error::{CollabError, CollabResult};
pub use models::*;
pub use navigation::{Navigator, Route};
pub use session::{SessionStore, Storage};
pub use state::{AppStore, SessionContainer, TeamContainer};
