use std::sync::Arc;

use crate::client::ApiClient;
use crate::error::{CollabError, CollabResult};
use crate::logging::log_info;
use crate::models::{JoinTeamMessage, Team, Visibility};

use super::{SessionContainer, TeamContainer};

/// Root of client state: the session and the team cache, sharing one
/// API client.
///
/// Team operations should go through here. Each one is sent with the
/// session's request context, and a 401 from any of them collapses the
/// in-memory session to anonymous.
pub struct AppStore {
    pub session: SessionContainer,
    pub teams: TeamContainer,
}

impl AppStore {
    /// Fresh in-memory state; storage is only consulted by bootstrap.
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            session: SessionContainer::new(Arc::clone(&api)),
            teams: TeamContainer::new(api),
        }
    }

    /// In-memory session hydrated from storage.
    pub fn restore(api: Arc<ApiClient>) -> Self {
        Self {
            session: SessionContainer::restore(Arc::clone(&api)),
            teams: TeamContainer::new(api),
        }
    }

    pub fn from_parts(session: SessionContainer, teams: TeamContainer) -> Self {
        Self { session, teams }
    }

    /// Storage and navigation were already handled by the client; this drops
    /// the in-memory token so later requests stop sending it.
    fn expire_on_unauthorized<T>(&mut self, result: CollabResult<T>) -> CollabResult<T> {
        if let Err(CollabError::Unauthorized { .. }) = &result {
            log_info("Team request rejected as unauthorized, signing out");
            self.session.logout();
        }
        result
    }

    pub async fn fetch_teams(&mut self) -> CollabResult<&[Team]> {
        let ctx = self.session.request_context();
        let result = self.teams.fetch_teams(&ctx).await.map(|_| ());
        self.expire_on_unauthorized(result)?;
        Ok(&self.teams.state().teams)
    }

    /// Creates a team owned by the signed-in user.
    pub async fn create_team(&mut self, name: &str) -> CollabResult<&[Team]> {
        let ctx = self.session.request_context();
        let created_by = self.session.state().user.as_ref().map(|u| u.id.clone());
        let result = self
            .teams
            .create_team(&ctx, name, created_by.as_deref())
            .await
            .map(|_| ());
        self.expire_on_unauthorized(result)?;
        Ok(&self.teams.state().teams)
    }

    pub async fn fetch_team_by_id(&mut self, team_id: &str) -> CollabResult<Option<&Team>> {
        let ctx = self.session.request_context();
        let result = self.teams.fetch_team_by_id(&ctx, team_id).await.map(|_| ());
        self.expire_on_unauthorized(result)?;
        Ok(self.teams.state().current_team.as_ref())
    }

    pub async fn add_member_to_team(&mut self, team_id: &str, email: &str) -> CollabResult<()> {
        let ctx = self.session.request_context();
        let result = self.teams.add_member_to_team(&ctx, team_id, email).await;
        self.expire_on_unauthorized(result)
    }

    pub async fn generate_join_link(&mut self, team_id: &str) -> CollabResult<&str> {
        let ctx = self.session.request_context();
        let result = self.teams.generate_join_link(&ctx, team_id).await.map(|_| ());
        self.expire_on_unauthorized(result)?;
        Ok(self.teams.state().join_link.as_deref().unwrap_or_default())
    }

    pub async fn join_team_with_link(&mut self, team_id: &str, token: &str) -> CollabResult<JoinTeamMessage> {
        let ctx = self.session.request_context();
        let result = self.teams.join_team_with_link(&ctx, team_id, token).await;
        self.expire_on_unauthorized(result)
    }

    pub async fn join_team_with_url(&mut self, link: &str) -> CollabResult<JoinTeamMessage> {
        let ctx = self.session.request_context();
        let result = self.teams.join_team_with_url(&ctx, link).await;
        self.expire_on_unauthorized(result)
    }

    pub async fn create_channel(&mut self, team_id: &str, name: &str, visibility: Visibility) -> CollabResult<()> {
        let ctx = self.session.request_context();
        let result = self.teams.create_channel(&ctx, team_id, name, visibility).await;
        self.expire_on_unauthorized(result)
    }
}
