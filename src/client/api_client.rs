use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::{CollabError, CollabResult};
use crate::logging::{log_debug, log_error, log_info};
use crate::models::envelope::{
    parse_profile, parse_team_list, AddMemberEnvelope, ErrorBody, JoinLinkEnvelope,
    JoinTeamEnvelope, ResponseMode, TeamEnvelope,
};
use crate::models::*;
use crate::navigation::{Navigator, Route};
use crate::session::SessionStore;

use super::RequestContext;

/// The single gateway to the backend.
///
/// Each call takes a [`RequestContext`] for its bearer token. Any 401 clears
/// the persisted session and forces navigation to the login view, whichever
/// call triggered it; every other failure is returned to the caller as is.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: SessionStore,
    navigator: Arc<dyn Navigator>,
    response_mode: ResponseMode,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        store: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> CollabResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
            navigator,
            response_mode: ResponseMode::Lenient,
        })
    }

    pub fn with_response_mode(mut self, mode: ResponseMode) -> Self {
        self.response_mode = mode;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Context carrying the latest persisted token.
    pub fn context(&self) -> RequestContext {
        RequestContext::from_token(self.store.token())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn handle_unauthorized(&self) {
        log_info("Received 401, clearing persisted session");
        if let Err(e) = self.store.clear() {
            log_error(&format!("Failed to clear persisted session: {}", e));
        }
        self.navigator.navigate(Route::Login);
    }

    async fn send(&self, ctx: &RequestContext, request: RequestBuilder) -> CollabResult<Value> {
        let request = match ctx.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        log_debug(&format!("{} {}", status.as_u16(), response.url().path()));

        let text = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
            return Err(CollabError::Unauthorized {
                message: ErrorBody::from_text(&text).message,
            });
        }

        if !status.is_success() {
            let body = ErrorBody::from_text(&text);
            return Err(CollabError::Http {
                status: status.as_u16(),
                message: body.message,
                error: body.error,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        // Some routes answer with plain text; keep it for callers that ignore the body
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }

    fn decode<T: DeserializeOwned>(value: Value, what: &str) -> CollabResult<T> {
        serde_json::from_value(value)
            .map_err(|e| CollabError::MalformedResponse(format!("{}: {}", what, e)))
    }

    pub async fn signup(&self, ctx: &RequestContext, form: &RegisterForm) -> CollabResult<AuthResponse> {
        let mut multipart = Form::new()
            .text("name", form.name.clone())
            .text("email", form.email.clone())
            .text("password", form.password.clone());

        if let Some(image) = &form.profile_image {
            let part = Part::bytes(image.bytes.clone())
                .file_name(image.file_name.clone())
                .mime_str(&image.mime_type)?;
            multipart = multipart.part("profileImage", part);
        }

        let body = self
            .send(ctx, self.http.post(self.url("/auth/signup")).multipart(multipart))
            .await?;
        Self::decode(body, "signup response")
    }

    pub async fn login(&self, ctx: &RequestContext, credentials: &Credentials) -> CollabResult<AuthResponse> {
        let body = self
            .send(ctx, self.http.post(self.url("/auth/login")).json(credentials))
            .await?;
        Self::decode(body, "login response")
    }

    pub async fn get_me(&self, ctx: &RequestContext) -> CollabResult<UserProfile> {
        let body = self.send(ctx, self.http.get(self.url("/users/me"))).await?;
        parse_profile(body)
    }

    pub async fn create_team(&self, ctx: &RequestContext, request: &CreateTeamRequest) -> CollabResult<()> {
        self.send(ctx, self.http.post(self.url("/teams/create-team")).json(request))
            .await?;
        Ok(())
    }

    pub async fn get_user_teams(&self, ctx: &RequestContext) -> CollabResult<Vec<Team>> {
        let body = self.send(ctx, self.http.get(self.url("/users/teams"))).await?;
        parse_team_list(&body, self.response_mode)
    }

    /// `None` only in lenient mode, when the body carries no team.
    pub async fn get_team(&self, ctx: &RequestContext, team_id: &str) -> CollabResult<Option<Team>> {
        let body = self
            .send(ctx, self.http.get(self.url(&format!("/teams/{}", team_id))))
            .await?;
        let envelope: TeamEnvelope = Self::decode(body, "team response")?;
        match (envelope.team, self.response_mode) {
            (None, ResponseMode::Strict) => Err(CollabError::MalformedResponse(
                "expected `team` object".to_string(),
            )),
            (team, _) => Ok(team),
        }
    }

    pub async fn add_member(&self, ctx: &RequestContext, team_id: &str, email: &str) -> CollabResult<AddMemberEnvelope> {
        let body = self
            .send(
                ctx,
                self.http
                    .post(self.url(&format!("/teams/add-member/{}", team_id)))
                    .json(&json!({ "email": email })),
            )
            .await?;
        match body {
            Value::Null => Ok(AddMemberEnvelope { message: None, team: None }),
            body => Self::decode(body, "add member response"),
        }
    }

    pub async fn generate_join_link(&self, ctx: &RequestContext, team_id: &str) -> CollabResult<String> {
        let body = self
            .send(
                ctx,
                self.http
                    .post(self.url(&format!("/teams/generate-join-link/{}", team_id))),
            )
            .await?;
        let envelope: JoinLinkEnvelope = Self::decode(body, "join link response")?;
        Ok(envelope.join_link)
    }

    pub async fn join_team(&self, ctx: &RequestContext, team_id: &str, token: &str) -> CollabResult<JoinTeamEnvelope> {
        let body = self
            .send(
                ctx,
                self.http
                    .post(self.url(&format!("/teams/join-team/{}", team_id)))
                    .json(&json!({ "token": token })),
            )
            .await?;
        match body {
            Value::Null => Ok(JoinTeamEnvelope { message: None, code: None }),
            body => Self::decode(body, "join team response"),
        }
    }

    pub async fn create_channel(
        &self,
        ctx: &RequestContext,
        team_id: &str,
        request: &CreateChannelRequest,
    ) -> CollabResult<Value> {
        self.send(
            ctx,
            self.http
                .post(self.url(&format!("/channels/{}", team_id)))
                .json(request),
        )
        .await
    }
}
