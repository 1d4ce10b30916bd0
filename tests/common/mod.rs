#![allow(dead_code)]

use std::sync::Arc;

use collab_cli::navigation::RecordingNavigator;
use collab_cli::session::{MemoryStorage, SessionStore, Storage};
use collab_cli::{ApiClient, ResponseMode};
use serde_json::{json, Value};
use wiremock::MockServer;

pub struct Harness {
    pub server: MockServer,
    pub storage: Arc<MemoryStorage>,
    pub navigator: Arc<RecordingNavigator>,
    pub api: Arc<ApiClient>,
}

impl Harness {
    pub async fn start() -> Self {
        Self::start_with_mode(ResponseMode::Lenient).await
    }

    pub async fn start_with_mode(mode: ResponseMode) -> Self {
        let server = MockServer::start().await;
        let storage = Arc::new(MemoryStorage::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let api = ApiClient::new(
            format!("{}/api", server.uri()),
            SessionStore::new(storage.clone()),
            navigator.clone(),
        )
        .unwrap()
        .with_response_mode(mode);

        Self {
            server,
            storage,
            navigator,
            api: Arc::new(api),
        }
    }

    /// Puts a signed-in session into storage.
    pub fn seed_session(&self, token: &str) {
        self.storage.set_item("auth_token", token).unwrap();
        self.storage.set_item("auth_user", &user_json().to_string()).unwrap();
    }

    pub async fn request_count(&self) -> usize {
        self.server.received_requests().await.map(|r| r.len()).unwrap_or(0)
    }
}

pub fn user_json() -> Value {
    json!({ "_id": "u1", "name": "Ada Lovelace", "email": "ada@example.com" })
}

pub fn team_json(id: &str, name: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "createdBy": "u1",
        "members": [{ "_id": "u1", "name": "Ada Lovelace", "email": "ada@example.com" }],
        "channels": [{ "_id": "c1", "name": "general", "visibility": "public", "members": ["u1"] }],
        "createdAt": "2024-01-15T10:00:00Z"
    })
}
