use std::sync::Arc;
use lazy_static::lazy_static;
use regex::Regex;
use tokio::sync::watch;

use crate::client::{ApiClient, RequestContext};
use crate::constants::{
    MSG_ADD_MEMBER_FAILED, MSG_CHANNEL_CREATED, MSG_CHANNEL_FAILED, MSG_CHANNEL_NAME_REQUIRED,
    MSG_EMAIL_NOT_REGISTERED, MSG_FETCH_TEAM_FAILED,
};
use crate::error::{CollabError, CollabResult};
use crate::logging::{log_error, log_info};
use crate::models::{
    CreateChannelRequest, CreateTeamRequest, JoinLink, JoinTeamMessage, Team, Visibility,
};

use super::OpState;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex");
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamState {
    pub teams: Vec<Team>,
    pub current_team: Option<Team>,
    /// Shared by `fetch_teams` and `create_team`, which both replace the list.
    pub list: OpState,
    pub fetch_team_by_id: OpState,
    pub add_member: OpState,
    pub join_link: Option<String>,
    pub join_link_op: OpState,
    pub join_team: OpState,
    pub join_team_message: Option<JoinTeamMessage>,
    pub create_channel: OpState,
    pub channel_message: Option<String>,
}

/// Cached copies of the user's teams. Nothing here is authoritative: every
/// fetch replaces what was held before.
///
/// Operations take the caller's [`RequestContext`]; [`AppStore`](super::AppStore)
/// supplies the session's and reacts to a rejected token.
pub struct TeamContainer {
    api: Arc<ApiClient>,
    state: TeamState,
    tx: watch::Sender<TeamState>,
}

fn non_empty(text: String, fallback: &str) -> String {
    if text.trim().is_empty() { fallback.to_string() } else { text }
}

impl TeamContainer {
    pub fn new(api: Arc<ApiClient>) -> Self {
        let state = TeamState::default();
        let (tx, _) = watch::channel(state.clone());
        Self { api, state, tx }
    }

    pub fn state(&self) -> &TeamState {
        &self.state
    }

    pub fn subscribe(&self) -> watch::Receiver<TeamState> {
        self.tx.subscribe()
    }

    fn publish(&self) {
        self.tx.send_replace(self.state.clone());
    }

    pub async fn fetch_teams(&mut self, ctx: &RequestContext) -> CollabResult<&[Team]> {
        self.state.list.start();
        self.publish();

        match self.api.get_user_teams(ctx).await {
            Ok(teams) => {
                self.state.teams = teams;
                self.state.list.succeed();
                self.publish();
                Ok(&self.state.teams)
            }
            Err(e) => {
                log_error(&format!("Fetch teams error: {}", e));
                self.state.list.fail(e.message_or_text());
                self.state.teams.clear();
                self.publish();
                Err(e)
            }
        }
    }

    /// Creates a team, then replaces the list with a fresh fetch rather than
    /// inserting locally.
    pub async fn create_team(&mut self, ctx: &RequestContext, name: &str, created_by: Option<&str>) -> CollabResult<&[Team]> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CollabError::InvalidInput("Team name is required".to_string()));
        }

        self.state.list.start();
        self.publish();

        let request = CreateTeamRequest {
            name: name.to_string(),
            created_by: created_by.map(str::to_string),
        };

        let result = match self.api.create_team(ctx, &request).await {
            Ok(()) => self.api.get_user_teams(ctx).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(teams) => {
                log_info(&format!("Created team {}", name));
                self.state.teams = teams;
                self.state.list.succeed();
                self.publish();
                Ok(&self.state.teams)
            }
            Err(e) => {
                log_error(&format!("Create team error: {}", e));
                self.state.list.fail(e.message_or_text());
                self.publish();
                Err(e)
            }
        }
    }

    pub async fn fetch_team_by_id(&mut self, ctx: &RequestContext, team_id: &str) -> CollabResult<Option<&Team>> {
        self.state.fetch_team_by_id.start();
        self.state.current_team = None;
        self.publish();

        match self.api.get_team(ctx, team_id).await {
            Ok(team) => {
                self.state.current_team = team;
                self.state.fetch_team_by_id.succeed();
                self.publish();
                Ok(self.state.current_team.as_ref())
            }
            Err(e) => {
                self.state
                    .fetch_team_by_id
                    .fail(non_empty(e.message_or_text(), MSG_FETCH_TEAM_FAILED));
                self.state.current_team = None;
                self.publish();
                Err(e)
            }
        }
    }

    /// Invites a registered user by email. A 404 means the address has no
    /// account and gets its own message.
    pub async fn add_member_to_team(&mut self, ctx: &RequestContext, team_id: &str, email: &str) -> CollabResult<()> {
        self.state.add_member.start();
        self.publish();

        let email = email.trim();
        if !is_valid_email(email) {
            let message = "Please enter a valid email address.";
            self.state.add_member.fail(message);
            self.publish();
            return Err(CollabError::InvalidInput(message.to_string()));
        }

        match self.api.add_member(ctx, team_id, email).await {
            Ok(envelope) => {
                log_info(&format!("Added {} to team {}", email, team_id));
                if let Some(team) = envelope.team {
                    self.state.current_team = Some(team);
                }
                self.state.add_member.succeed();
                self.publish();
                Ok(())
            }
            Err(e) => {
                log_error(&format!("Error in add member: {}", e));
                let message = if e.status() == Some(404) {
                    MSG_EMAIL_NOT_REGISTERED.to_string()
                } else {
                    non_empty(e.message_or_text(), MSG_ADD_MEMBER_FAILED)
                };
                self.state.add_member.fail(message);
                self.publish();
                Err(e)
            }
        }
    }

    /// Requests a fresh invitation link. There is one slot; the latest
    /// link wins regardless of team.
    pub async fn generate_join_link(&mut self, ctx: &RequestContext, team_id: &str) -> CollabResult<&str> {
        self.state.join_link_op.start();
        self.publish();

        match self.api.generate_join_link(ctx, team_id).await {
            Ok(link) => {
                self.state.join_link = Some(link);
                self.state.join_link_op.succeed();
                self.publish();
                Ok(self.state.join_link.as_deref().unwrap_or_default())
            }
            Err(e) => {
                self.state.join_link_op.fail(e.error_or_text());
                self.publish();
                Err(e)
            }
        }
    }

    /// Redeems a join token, then reloads the team into `current_team`.
    pub async fn join_team_with_link(&mut self, ctx: &RequestContext, team_id: &str, token: &str) -> CollabResult<JoinTeamMessage> {
        self.state.join_team.start();
        self.state.join_team_message = None;
        self.publish();

        let result = match self.api.join_team(ctx, team_id, token).await {
            Ok(envelope) => self
                .api
                .get_team(ctx, team_id)
                .await
                .map(|team| (envelope, team)),
            Err(e) => Err(e),
        };

        match result {
            Ok((envelope, team)) => {
                let message = JoinTeamMessage::from_response(
                    envelope.code.as_deref(),
                    envelope.message.as_deref(),
                );
                log_info(&format!("Join team {}: {:?}", team_id, envelope.message));
                if let Some(team) = team {
                    self.state.current_team = Some(team);
                }
                self.state.join_team_message = Some(message);
                self.state.join_team.succeed();
                self.publish();
                Ok(message)
            }
            Err(e) => {
                self.state.join_team.fail(e.error_or_text());
                self.publish();
                Err(e)
            }
        }
    }

    /// Same as [`join_team_with_link`](Self::join_team_with_link) but takes
    /// the pasted invitation URL.
    pub async fn join_team_with_url(&mut self, ctx: &RequestContext, link: &str) -> CollabResult<JoinTeamMessage> {
        let link = match JoinLink::parse(link) {
            Ok(link) => link,
            Err(e) => {
                self.state.join_team.fail(e.to_string());
                self.publish();
                return Err(e);
            }
        };
        self.join_team_with_link(ctx, &link.team_id, &link.token).await
    }

    /// Creates a channel and reloads the team so it shows up.
    pub async fn create_channel(&mut self, ctx: &RequestContext, team_id: &str, name: &str, visibility: Visibility) -> CollabResult<()> {
        self.state.create_channel.start();
        self.state.channel_message = None;
        self.publish();

        let name = name.trim();
        if name.is_empty() {
            self.state.create_channel.fail(MSG_CHANNEL_NAME_REQUIRED);
            self.publish();
            return Err(CollabError::InvalidInput(MSG_CHANNEL_NAME_REQUIRED.to_string()));
        }

        let request = CreateChannelRequest {
            name: name.to_string(),
            visibility,
        };

        match self.api.create_channel(ctx, team_id, &request).await {
            Ok(_) => {
                self.state.channel_message = Some(MSG_CHANNEL_CREATED.to_string());
                self.state.create_channel.succeed();
                self.publish();
                match self.fetch_team_by_id(ctx, team_id).await {
                    Err(e @ CollabError::Unauthorized { .. }) => Err(e),
                    Err(e) => {
                        log_error(&format!("Reloading team after channel creation failed: {}", e));
                        Ok(())
                    }
                    Ok(_) => Ok(()),
                }
            }
            Err(e) => {
                self.state
                    .create_channel
                    .fail(non_empty(e.message_or_text(), MSG_CHANNEL_FAILED));
                self.publish();
                Err(e)
            }
        }
    }

    pub fn reset_team_state(&mut self) {
        self.state.list.reset();
        self.state.teams.clear();
        self.publish();
    }

    pub fn reset_add_member_status(&mut self) {
        self.state.add_member.reset();
        self.publish();
    }

    pub fn reset_join_link_state(&mut self) {
        self.state.join_link = None;
        self.state.join_link_op.reset();
        self.publish();
    }

    pub fn reset_join_team_status(&mut self) {
        self.state.join_team.reset();
        self.state.join_team_message = None;
        self.publish();
    }
}
