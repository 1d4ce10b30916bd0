mod common;

use collab_cli::bootstrap::{self, BootstrapStep};
use collab_cli::navigation::Route;
use collab_cli::state::{AppStore, AuthStatus, SessionContainer, SessionState, TeamContainer};
use collab_cli::UserProfile;
use common::{team_json, user_json, Harness};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn mount_profile(harness: &Harness, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(response)
        .mount(&harness.server)
        .await;
}

#[tokio::test]
async fn anonymous_start_is_idle_and_silent() {
    let harness = Harness::start().await;
    let mut app = AppStore::new(harness.api.clone());

    let steps = bootstrap::run(&mut app, harness.navigator.as_ref()).await;

    assert_eq!(steps, vec![BootstrapStep::Idle]);
    assert_eq!(harness.request_count().await, 0);
    assert!(harness.navigator.routes().is_empty());
}

#[tokio::test]
async fn stored_session_is_adopted_and_restored() {
    let harness = Harness::start().await;
    harness.seed_session("tok-1");

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": user_json() })))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "teams": [team_json("t1", "Engineering")]
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let mut app = AppStore::new(harness.api.clone());
    let steps = bootstrap::run(&mut app, harness.navigator.as_ref()).await;

    assert_eq!(
        steps,
        vec![BootstrapStep::AdoptedToken, BootstrapStep::Restored, BootstrapStep::Idle]
    );
    assert_eq!(app.session.state().status, AuthStatus::Authenticated);
    assert_eq!(app.teams.state().teams.len(), 1);
    assert!(harness.navigator.routes().is_empty());
}

#[tokio::test]
async fn rejected_token_logs_out_and_redirects() {
    let harness = Harness::start().await;
    harness.seed_session("revoked");
    mount_profile(
        &harness,
        ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid token" })),
    )
    .await;

    let mut app = AppStore::new(harness.api.clone());
    let steps = bootstrap::run(&mut app, harness.navigator.as_ref()).await;

    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0], BootstrapStep::AdoptedToken);
    assert!(matches!(steps[1], BootstrapStep::LoggedOut(_)));
    assert!(harness.storage.is_empty());
    assert_eq!(harness.navigator.last(), Some(Route::Login));
    assert_eq!(app.session.state().status, AuthStatus::Anonymous);
    assert!(app.session.state().token.is_none());
}

#[tokio::test]
async fn team_fetch_failure_also_logs_out() {
    let harness = Harness::start().await;
    harness.seed_session("tok-1");
    mount_profile(&harness, ResponseTemplate::new(200).set_body_json(user_json())).await;
    Mock::given(method("GET"))
        .and(path("/api/users/teams"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&harness.server)
        .await;

    let mut app = AppStore::new(harness.api.clone());
    let steps = bootstrap::run(&mut app, harness.navigator.as_ref()).await;

    assert!(matches!(steps.last(), Some(BootstrapStep::LoggedOut(_))));
    assert!(harness.storage.is_empty());
    assert_eq!(harness.navigator.last(), Some(Route::Login));
}

#[tokio::test]
async fn user_without_token_is_treated_as_corrupt() {
    let harness = Harness::start().await;
    let user: UserProfile = serde_json::from_value(user_json()).unwrap();
    let session = SessionContainer::with_state(
        harness.api.clone(),
        SessionState {
            user: Some(user),
            ..SessionState::default()
        },
    );
    let mut app = AppStore::from_parts(session, TeamContainer::new(harness.api.clone()));

    let steps = bootstrap::run(&mut app, harness.navigator.as_ref()).await;

    assert_eq!(steps.len(), 1);
    assert!(matches!(steps[0], BootstrapStep::LoggedOut(_)));
    assert!(app.session.state().user.is_none());
    assert_eq!(harness.navigator.routes(), vec![Route::Login]);
    assert_eq!(harness.request_count().await, 0);
}

#[tokio::test]
async fn restored_state_is_already_consistent() {
    let harness = Harness::start().await;
    harness.seed_session("tok-1");

    let mut app = AppStore::restore(harness.api.clone());
    let step = bootstrap::step(&mut app, harness.navigator.as_ref()).await;

    assert_eq!(step, BootstrapStep::Idle);
    assert_eq!(harness.request_count().await, 0);
}
