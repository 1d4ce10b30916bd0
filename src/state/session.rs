use std::sync::Arc;
use tokio::sync::watch;

use crate::client::{ApiClient, RequestContext};
use crate::constants::{MSG_LOGIN_FAILED, MSG_PROFILE_FAILED, MSG_REGISTRATION_FAILED};
use crate::error::{CollabError, CollabResult};
use crate::logging::{log_error, log_info};
use crate::models::{AuthResponse, Credentials, RegisterForm, Session, UserProfile};
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStatus {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    pub status: AuthStatus,
    pub is_success: bool,
    pub message: String,
    pub signup_success: bool,
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        self.status == AuthStatus::Authenticating
    }

    pub fn is_error(&self) -> bool {
        self.status == AuthStatus::Error
    }

    pub fn session(&self) -> Session {
        Session {
            token: self.token.clone(),
            user: self.user.clone(),
        }
    }
}

/// In-memory authentication state plus the operations that move it.
///
/// Every change to the token or user is written through to the
/// [`SessionStore`]; the transient `Authenticating` state is not.
pub struct SessionContainer {
    api: Arc<ApiClient>,
    state: SessionState,
    tx: watch::Sender<SessionState>,
}

impl SessionContainer {
    /// Starts anonymous regardless of what storage holds.
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self::with_state(api, SessionState::default())
    }

    /// Starts from whatever storage holds, like a page load would.
    pub fn restore(api: Arc<ApiClient>) -> Self {
        let Session { token, user } = api.store().load();
        let status = match (&token, &user) {
            (Some(_), Some(_)) => AuthStatus::Authenticated,
            _ => AuthStatus::Anonymous,
        };
        let state = SessionState {
            token,
            user,
            status,
            ..SessionState::default()
        };
        Self::with_state(api, state)
    }

    pub fn with_state(api: Arc<ApiClient>, state: SessionState) -> Self {
        let (tx, _) = watch::channel(state.clone());
        Self { api, state, tx }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    pub fn store(&self) -> &SessionStore {
        self.api.store()
    }

    /// Latest persisted token, falling back to one adopted via `set_token`.
    pub fn request_context(&self) -> RequestContext {
        self.api.context().or_token(self.state.token.as_deref())
    }

    fn publish(&self) {
        self.tx.send_replace(self.state.clone());
    }

    fn begin(&mut self) {
        self.state.status = AuthStatus::Authenticating;
        self.state.is_success = false;
        self.publish();
    }

    fn persist(&self) {
        if let Err(e) = self.store().save(self.state.token.as_deref(), self.state.user.as_ref()) {
            log_error(&format!("Failed to persist session: {}", e));
        }
    }

    fn clear_session(&mut self) {
        self.state.token = None;
        self.state.user = None;
        if let Err(e) = self.store().clear() {
            log_error(&format!("Failed to clear persisted session: {}", e));
        }
    }

    fn fail(&mut self, message: String) {
        self.state.status = AuthStatus::Error;
        self.state.is_success = false;
        self.state.message = message;
        self.clear_session();
        self.publish();
    }

    fn settle(&mut self) {
        self.state.status = match (&self.state.token, &self.state.user) {
            (Some(_), Some(_)) => AuthStatus::Authenticated,
            _ => AuthStatus::Anonymous,
        };
    }

    fn accept(&mut self, response: AuthResponse) {
        self.state.token = response.token;
        self.state.user = response.user;
        self.state.is_success = true;
        self.state.message = String::new();
        self.settle();
        // A signup that returns no token leaves the caller signed out
        if self.state.token.is_some() {
            self.persist();
        }
        self.publish();
    }

    pub async fn register(&mut self, form: &RegisterForm) -> CollabResult<()> {
        self.begin();
        let ctx = self.request_context();
        match self.api.signup(&ctx, form).await {
            Ok(response) => {
                log_info(&format!("Registered {}", form.email));
                self.state.signup_success = true;
                self.accept(response);
                Ok(())
            }
            Err(e) => {
                self.fail(e.server_message().unwrap_or(MSG_REGISTRATION_FAILED).to_string());
                Err(e)
            }
        }
    }

    pub async fn login(&mut self, credentials: &Credentials) -> CollabResult<()> {
        self.begin();
        let ctx = self.request_context();
        let result = match self.api.login(&ctx, credentials).await {
            Ok(response) if response.token.is_none() => Err(CollabError::MalformedResponse(
                "login response carried no token".to_string(),
            )),
            other => other,
        };

        match result {
            Ok(response) => {
                log_info(&format!("Logged in as {}", credentials.email));
                self.accept(response);
                Ok(())
            }
            Err(e) => {
                self.fail(e.server_message().unwrap_or(MSG_LOGIN_FAILED).to_string());
                Err(e)
            }
        }
    }

    /// Refreshes the cached profile. Without an in-memory token this fails
    /// locally, never touching the network, and clears the session exactly
    /// as a rejected request would.
    pub async fn fetch_profile(&mut self) -> CollabResult<UserProfile> {
        self.begin();

        let result = match self.state.token.clone() {
            None => Err(CollabError::NoToken),
            Some(_) => {
                let ctx = self.request_context();
                self.api.get_me(&ctx).await
            }
        };

        match result {
            Ok(user) => {
                self.state.user = Some(user.clone());
                self.state.is_success = true;
                self.settle();
                self.persist();
                self.publish();
                Ok(user)
            }
            Err(e) => {
                self.fail(e.server_message().unwrap_or(MSG_PROFILE_FAILED).to_string());
                Err(e)
            }
        }
    }

    /// Always succeeds.
    pub fn logout(&mut self) {
        self.clear_session();
        self.state.status = AuthStatus::Anonymous;
        self.state.is_success = false;
        self.state.message = String::new();
        self.publish();
    }

    /// Adopts a token found outside the container (storage at startup).
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.state.token = Some(token.into());
        self.publish();
    }

    pub fn reset(&mut self) {
        self.settle();
        self.state.is_success = false;
        self.state.message = String::new();
        self.publish();
    }

    pub fn clear_error(&mut self) {
        if self.state.status == AuthStatus::Error {
            self.settle();
        }
        self.state.message = String::new();
        self.publish();
    }

    pub fn reset_signup_success(&mut self) {
        self.state.signup_success = false;
        self.publish();
    }
}
