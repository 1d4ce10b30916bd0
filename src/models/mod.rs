pub mod envelope;
pub mod join_link;
pub mod team;
pub mod user;

// Re-export commonly used types
pub use envelope::{ErrorBody, ResponseMode};
pub use join_link::{JoinLink, JoinTeamMessage};
pub use team::{
    Channel, CreateChannelRequest, CreateTeamRequest, Member, Role, Team, Visibility,
};
pub use user::{AuthResponse, Credentials, ProfileImage, RegisterForm, UserProfile};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Session as believed by the client: who is authenticated, with what token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.user.is_none()
    }
}

// References arrive either as a bare id or as a populated document.
fn reference_id(value: &Value) -> Option<String> {
    match value {
        Value::String(id) => Some(id.clone()),
        Value::Object(map) => map
            .get("_id")
            .or_else(|| map.get("id"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

pub(crate) fn id_or_object<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(reference_id))
}

pub(crate) fn ids_or_objects<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.iter().filter_map(reference_id).collect(),
        _ => Vec::new(),
    })
}
