//! Response bodies of the REST API and the validated parsing applied to
//! them before they reach the state containers.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{CollabError, CollabResult};
use crate::logging::log_warn;

use super::{Team, UserProfile};

/// How to treat a payload whose shape does not match the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// Reject with `MalformedResponse`.
    Strict,
    /// Log and substitute an empty value.
    Lenient,
}

impl ResponseMode {
    pub fn from_strict(strict: bool) -> Self {
        if strict { ResponseMode::Strict } else { ResponseMode::Lenient }
    }
}

/// Error body the backend sends with non-2xx responses. Some routes use
/// `message`, the team-link routes use `error`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn from_text(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct TeamEnvelope {
    pub team: Option<Team>,
}

#[derive(Debug, Deserialize)]
pub struct JoinLinkEnvelope {
    #[serde(rename = "joinLink")]
    pub join_link: String,
}

#[derive(Debug, Deserialize)]
pub struct JoinTeamEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddMemberEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub team: Option<Team>,
}

/// `GET /users/me` answers either with the bare profile or `{ user }`.
pub fn parse_profile(body: Value) -> CollabResult<UserProfile> {
    let value = match body {
        Value::Object(mut map) if map.contains_key("user") && !map.contains_key("_id") => {
            map.remove("user").unwrap_or(Value::Null)
        }
        other => other,
    };
    serde_json::from_value(value)
        .map_err(|e| CollabError::MalformedResponse(format!("user profile: {}", e)))
}

/// Reads `{ teams: [...] }`. A missing or non-array `teams` field is an error
/// in strict mode and an empty list otherwise.
pub fn parse_team_list(body: &Value, mode: ResponseMode) -> CollabResult<Vec<Team>> {
    let teams = match body.get("teams") {
        Some(Value::Array(items)) => items,
        other => {
            let found = match other {
                None => "nothing".to_string(),
                Some(v) => json_kind(v).to_string(),
            };
            return degrade(mode, format!("expected `teams` array, found {}", found));
        }
    };

    let mut parsed = Vec::with_capacity(teams.len());
    for item in teams {
        match serde_json::from_value::<Team>(item.clone()) {
            Ok(team) => parsed.push(team),
            Err(e) if mode == ResponseMode::Strict => {
                return Err(CollabError::MalformedResponse(format!("team entry: {}", e)));
            }
            Err(e) => log_warn(&format!("Skipping malformed team entry: {}", e)),
        }
    }
    Ok(parsed)
}

fn degrade(mode: ResponseMode, reason: String) -> CollabResult<Vec<Team>> {
    match mode {
        ResponseMode::Strict => Err(CollabError::MalformedResponse(reason)),
        ResponseMode::Lenient => {
            log_warn(&format!("Treating team list as empty: {}", reason));
            Ok(Vec::new())
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
