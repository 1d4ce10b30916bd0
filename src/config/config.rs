use std::env;
use std::fs;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};

use crate::constants::{APP_DIR, API_URL_ENV, COLLAB_API_URL, CONFIG_FILE, HOME_ENV};
use crate::error::{CollabError, CollabResult};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_url: Option<String>,
    pub default_team_id: Option<String>,
    /// Fail on malformed API payloads instead of degrading to empty values.
    /// Defaults to on in debug builds.
    pub strict_responses: Option<bool>,
}

impl Config {
    pub fn strict_responses(&self) -> bool {
        self.strict_responses.unwrap_or(cfg!(debug_assertions))
    }
}

fn home_dir() -> Option<PathBuf> {
    match env::var_os(HOME_ENV) {
        Some(dir) => Some(PathBuf::from(dir)),
        None => dirs::home_dir(),
    }
}

pub fn config_path() -> CollabResult<PathBuf> {
    home_dir()
        .map(|dir| dir.join(CONFIG_FILE))
        .ok_or_else(|| CollabError::ConfigError("Could not find home directory".to_string()))
}

/// Directory holding durable session storage.
pub fn app_dir() -> CollabResult<PathBuf> {
    if let Some(dir) = env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(dir).join(APP_DIR));
    }
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| CollabError::ConfigError("Could not find config directory".to_string()))
}

pub fn load_config() -> Config {
    let Ok(config_path) = config_path() else {
        return Config::default();
    };

    match fs::read_to_string(&config_path) {
        Ok(config_str) => serde_json::from_str(&config_str).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}

pub fn save_config(config: &Config) -> CollabResult<()> {
    let config_path = config_path()?;
    let config_str = serde_json::to_string_pretty(config)?;
    fs::write(config_path, config_str)?;
    Ok(())
}

pub fn get_api_url(config: &Config) -> String {
    // First check environment variable
    if let Ok(url) = env::var(API_URL_ENV) {
        if !url.trim().is_empty() {
            return url.trim_end_matches('/').to_string();
        }
    }

    // Then check config file
    if let Some(url) = &config.api_url {
        return url.trim_end_matches('/').to_string();
    }

    COLLAB_API_URL.to_string()
}
