use std::fmt;
use reqwest::Url;

use crate::constants::{MSG_ALREADY_MEMBER, MSG_INVALID_TEAM_LINK, MSG_JOINED, MSG_LINK_EXPIRED};
use crate::error::{CollabError, CollabResult};

/// Invitation URL issued by the server. Expiry is enforced server-side;
/// the client only displays, copies and decomposes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinLink {
    pub team_id: String,
    pub token: String,
}

impl JoinLink {
    /// Splits a link such as `https://host/join/<teamId>?token=<t>` into its
    /// team id (last non-empty path segment) and token (empty when absent).
    pub fn parse(link: &str) -> CollabResult<Self> {
        let url = Url::parse(link.trim())
            .map_err(|_| CollabError::InvalidInput(MSG_INVALID_TEAM_LINK.to_string()))?;

        let team_id = url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(str::to_string)
            .ok_or_else(|| CollabError::InvalidInput(MSG_INVALID_TEAM_LINK.to_string()))?;

        let token = url
            .query_pairs()
            .find(|(key, _)| key == "token")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default();

        Ok(Self { team_id, token })
    }
}

/// Friendly copy shown after a join attempt succeeds at the HTTP level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinTeamMessage {
    AlreadyMember,
    LinkExpired,
    Joined,
}

impl JoinTeamMessage {
    /// Structured codes win; otherwise the server's wording is matched on
    /// "already" / "expired", case-insensitively. Any change to that wording
    /// silently falls through to `Joined`.
    pub fn from_response(code: Option<&str>, message: Option<&str>) -> Self {
        match code {
            Some("ALREADY_MEMBER") => return JoinTeamMessage::AlreadyMember,
            Some("LINK_EXPIRED") => return JoinTeamMessage::LinkExpired,
            _ => {}
        }

        let message = message.map(str::to_lowercase).unwrap_or_default();
        if message.contains("already") {
            JoinTeamMessage::AlreadyMember
        } else if message.contains("expired") {
            JoinTeamMessage::LinkExpired
        } else {
            JoinTeamMessage::Joined
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            JoinTeamMessage::AlreadyMember => MSG_ALREADY_MEMBER,
            JoinTeamMessage::LinkExpired => MSG_LINK_EXPIRED,
            JoinTeamMessage::Joined => MSG_JOINED,
        }
    }
}

impl fmt::Display for JoinTeamMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
