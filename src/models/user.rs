use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The authenticated user as returned by the backend.
///
/// Fields beyond the ones the client displays are kept in `extra` so a
/// profile written to storage reads back unchanged.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct UserProfile {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "profileImage", default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Signup form; sent as multipart so an avatar can ride along.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub profile_image: Option<ProfileImage>,
}

#[derive(Debug, Clone)]
pub struct ProfileImage {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Body of a successful login or signup.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthResponse {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub message: Option<String>,
}
