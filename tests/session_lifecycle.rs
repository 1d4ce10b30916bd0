mod common;

use collab_cli::navigation::Route;
use collab_cli::state::{AuthStatus, SessionContainer};
use collab_cli::{CollabError, Credentials, RegisterForm, SessionStore};
use common::{user_json, Harness};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_regex, method, path};
use wiremock::{Mock, ResponseTemplate};

fn credentials() -> Credentials {
    Credentials {
        email: "ada@example.com".to_string(),
        password: "hunter2".to_string(),
    }
}

async fn mount_login(harness: &Harness) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "ada@example.com", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-1",
            "user": user_json()
        })))
        .mount(&harness.server)
        .await;
}

#[tokio::test]
async fn login_then_logout_returns_to_anonymous() {
    let harness = Harness::start().await;
    mount_login(&harness).await;

    let mut session = SessionContainer::new(harness.api.clone());
    let initial = session.state().clone();

    session.login(&credentials()).await.unwrap();
    assert_eq!(session.state().status, AuthStatus::Authenticated);
    assert_eq!(session.state().token.as_deref(), Some("tok-1"));
    assert_eq!(session.state().user.as_ref().map(|u| u.id.as_str()), Some("u1"));
    assert_eq!(harness.storage.len(), 2);

    session.logout();
    assert_eq!(session.state(), &initial);
    assert!(harness.storage.is_empty());
}

#[tokio::test]
async fn failed_login_stores_server_message_and_clears_session() {
    let harness = Harness::start().await;
    harness.seed_session("stale");

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": "Invalid credentials" })))
        .mount(&harness.server)
        .await;

    let mut session = SessionContainer::new(harness.api.clone());
    let result = session.login(&credentials()).await;

    assert!(matches!(result, Err(CollabError::Http { status: 400, .. })));
    assert_eq!(session.state().status, AuthStatus::Error);
    assert_eq!(session.state().message, "Invalid credentials");
    assert!(session.state().token.is_none());
    assert!(harness.storage.is_empty());
}

#[tokio::test]
async fn failed_login_without_body_uses_generic_message() {
    let harness = Harness::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&harness.server)
        .await;

    let mut session = SessionContainer::new(harness.api.clone());
    assert!(session.login(&credentials()).await.is_err());
    assert_eq!(session.state().message, "Login failed");
}

#[tokio::test]
async fn register_sends_multipart_and_authenticates() {
    let harness = Harness::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "token": "tok-new",
            "user": user_json()
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let mut session = SessionContainer::new(harness.api.clone());
    let form = RegisterForm {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        password: "hunter2".to_string(),
        profile_image: None,
    };
    session.register(&form).await.unwrap();

    assert!(session.state().signup_success);
    assert_eq!(session.state().status, AuthStatus::Authenticated);
    assert_eq!(SessionStore::new(harness.storage.clone()).token().as_deref(), Some("tok-new"));

    session.reset_signup_success();
    assert!(!session.state().signup_success);
}

#[tokio::test]
async fn failed_register_uses_fallback_message() {
    let harness = Harness::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .respond_with(ResponseTemplate::new(409).set_body_string("conflict"))
        .mount(&harness.server)
        .await;

    let mut session = SessionContainer::new(harness.api.clone());
    assert!(session.register(&RegisterForm::default()).await.is_err());
    assert_eq!(session.state().status, AuthStatus::Error);
    assert_eq!(session.state().message, "Registration failed");
    assert!(harness.storage.is_empty());
}

#[tokio::test]
async fn fetch_profile_without_token_never_hits_the_network() {
    let harness = Harness::start().await;
    // A stale user in storage must be wiped too
    harness.seed_session("orphan");

    let mut session = SessionContainer::new(harness.api.clone());
    let result = session.fetch_profile().await;

    assert!(matches!(result, Err(CollabError::NoToken)));
    assert_eq!(harness.request_count().await, 0);
    assert!(session.state().token.is_none());
    assert!(session.state().user.is_none());
    assert_eq!(session.state().message, "Failed to fetch user profile");
    assert!(harness.storage.is_empty());
}

#[tokio::test]
async fn fetch_profile_updates_user_and_persists() {
    let harness = Harness::start().await;
    harness.seed_session("tok-1");

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "u1",
            "name": "Ada King",
            "email": "ada@example.com"
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let mut session = SessionContainer::new(harness.api.clone());
    session.set_token("tok-1");
    let user = session.fetch_profile().await.unwrap();

    assert_eq!(user.name, "Ada King");
    assert_eq!(session.state().status, AuthStatus::Authenticated);
    let stored = SessionStore::new(harness.storage.clone()).load();
    assert_eq!(stored.user.map(|u| u.name), Some("Ada King".to_string()));
}

#[tokio::test]
async fn adopted_token_is_used_when_storage_is_empty() {
    let harness = Harness::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .and(header("authorization", "Bearer memory-only"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(1)
        .mount(&harness.server)
        .await;

    let mut session = SessionContainer::new(harness.api.clone());
    session.set_token("memory-only");
    session.fetch_profile().await.unwrap();

    assert_eq!(session.state().status, AuthStatus::Authenticated);
    assert_eq!(SessionStore::new(harness.storage.clone()).token().as_deref(), Some("memory-only"));
}

#[tokio::test]
async fn unauthorized_response_clears_storage_and_redirects() {
    let harness = Harness::start().await;
    harness.seed_session("expired");

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "jwt expired" })))
        .mount(&harness.server)
        .await;

    let mut session = SessionContainer::restore(harness.api.clone());
    assert_eq!(session.state().status, AuthStatus::Authenticated);

    let result = session.fetch_profile().await;
    assert!(matches!(result, Err(CollabError::Unauthorized { .. })));
    assert_eq!(session.state().message, "jwt expired");
    assert!(harness.storage.is_empty());
    assert_eq!(harness.navigator.last(), Some(Route::Login));
}

#[tokio::test]
async fn subscribers_see_the_latest_state() {
    let harness = Harness::start().await;
    mount_login(&harness).await;

    let mut session = SessionContainer::new(harness.api.clone());
    let mut rx = session.subscribe();

    session.login(&credentials()).await.unwrap();
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().status, AuthStatus::Authenticated);

    session.logout();
    assert_eq!(rx.borrow_and_update().status, AuthStatus::Anonymous);
}
