use std::sync::Arc;

use crate::bootstrap::BootstrapStep;
use crate::cli_context::CliContextBuilder;
use crate::config::Config;
use crate::error::CollabError;
use crate::navigation::RecordingNavigator;
use crate::session::{MemoryStorage, Storage};
use crate::state::AuthStatus;

fn builder(storage: Arc<MemoryStorage>) -> CliContextBuilder {
    CliContextBuilder::new()
        .with_config(Config::default())
        // Nothing listens here; these tests must never reach the network
        .with_api_url("http://127.0.0.1:9")
        .with_storage(storage)
        .with_navigator(Arc::new(RecordingNavigator::new()))
}

#[test]
fn test_cli_context_builder() {
    let context = builder(Arc::new(MemoryStorage::new())).build();
    assert!(context.is_ok());

    let mut context = context.unwrap();
    let state = context.store().session.state();
    assert_eq!(state.status, AuthStatus::Anonymous);
    assert!(state.token.is_none());
}

#[test]
fn test_response_mode_follows_config() {
    let strict = Config { strict_responses: Some(true), ..Config::default() };
    assert!(strict.strict_responses());

    let lenient = Config { strict_responses: Some(false), ..Config::default() };
    assert!(!lenient.strict_responses());
}

#[tokio::test]
async fn test_bootstrap_without_stored_session_is_idle() {
    let storage = Arc::new(MemoryStorage::new());
    let mut context = builder(Arc::clone(&storage)).build().unwrap();

    assert_eq!(context.bootstrap().await, BootstrapStep::Idle);
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_authenticated_requires_session() {
    let storage = Arc::new(MemoryStorage::new());
    let mut context = builder(storage).build().unwrap();

    match context.authenticated().await {
        Err(CollabError::NoToken) => {}
        Err(e) => panic!("Expected NoToken, got {}", e),
        Ok(_) => panic!("Expected NoToken"),
    }
}

#[tokio::test]
async fn test_stored_user_without_token_does_not_redirect() {
    let storage = Arc::new(MemoryStorage::new());
    storage
        .set_item("auth_user", r#"{"_id":"u1","name":"Ada","email":"ada@example.com"}"#)
        .unwrap();

    let navigator = Arc::new(RecordingNavigator::new());
    let mut context = builder(Arc::clone(&storage))
        .with_navigator(navigator.clone())
        .build()
        .unwrap();

    // Fresh in-memory state holds no user, so rules 1-3 do not apply
    assert_eq!(context.bootstrap().await, BootstrapStep::Idle);
    assert!(navigator.routes().is_empty());
}

#[test]
fn test_request_context_prefers_stored_token() {
    use crate::client::RequestContext;

    let stored = RequestContext::from_token(Some("stored".to_string())).or_token(Some("memory"));
    assert_eq!(stored.token(), Some("stored"));

    let adopted = RequestContext::from_token(None).or_token(Some("memory"));
    assert_eq!(adopted, RequestContext::bearer("memory"));

    assert_eq!(RequestContext::from_token(None).or_token(None), RequestContext::anonymous());
}
