#[allow(clippy::module_inception)]
pub mod config;

pub use config::{Config, app_dir, config_path, get_api_url, load_config, save_config};
