use std::sync::Arc;

use crate::constants::{AUTH_TOKEN_KEY, AUTH_USER_KEY};
use crate::error::CollabResult;
use crate::logging::log_error;
use crate::models::{Session, UserProfile};

use super::Storage;

/// Persisted half of the session: the token and the JSON-encoded profile.
/// Token validity is never judged here, only by server responses.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Writes whichever parts are present; absent parts are left untouched.
    pub fn save(&self, token: Option<&str>, user: Option<&UserProfile>) -> CollabResult<()> {
        if let Some(token) = token {
            self.storage.set_item(AUTH_TOKEN_KEY, token)?;
        }
        if let Some(user) = user {
            self.storage.set_item(AUTH_USER_KEY, &serde_json::to_string(user)?)?;
        }
        Ok(())
    }

    pub fn load(&self) -> Session {
        let token = self.storage.get_item(AUTH_TOKEN_KEY);
        let user = self.storage.get_item(AUTH_USER_KEY).and_then(|raw| {
            serde_json::from_str::<UserProfile>(&raw)
                .map_err(|e| log_error(&format!("Error parsing user data: {}", e)))
                .ok()
        });
        Session { token, user }
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get_item(AUTH_TOKEN_KEY)
    }

    pub fn clear(&self) -> CollabResult<()> {
        self.storage.remove_item(AUTH_TOKEN_KEY)?;
        self.storage.remove_item(AUTH_USER_KEY)?;
        Ok(())
    }
}
