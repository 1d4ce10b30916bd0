use std::fs;
use tempfile::TempDir;

use crate::collab_error;
use crate::commands::auth::load_avatar;
use crate::error::{CollabError, ErrorContext};

#[test]
fn test_missing_avatar_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("me.png");

    match load_avatar(path.to_str().unwrap()) {
        Err(CollabError::Unknown(msg)) => {
            assert!(msg.starts_with("Failed to read profile image"));
            assert!(msg.contains("me.png"));
        }
        other => panic!("Expected CollabError::Unknown, got {:?}", other.map(|i| i.file_name)),
    }
}

#[test]
fn test_avatar_mime_follows_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Portrait.JPG");
    fs::write(&path, [0xFF, 0xD8, 0xFF]).unwrap();

    let image = load_avatar(path.to_str().unwrap()).unwrap();
    assert_eq!(image.file_name, "Portrait.JPG");
    assert_eq!(image.mime_type, "image/jpeg");
    assert_eq!(image.bytes.len(), 3);
}

#[test]
fn test_missing_join_link_context() {
    let link: Option<String> = None;
    match link.context("Server returned no join link") {
        Err(CollabError::Unknown(msg)) => assert_eq!(msg, "Server returned no join link"),
        other => panic!("Expected CollabError::Unknown, got {:?}", other),
    }
}

#[test]
fn test_error_macro_formats_arguments() {
    match collab_error!(InvalidInput, "{} is required", "email") {
        CollabError::InvalidInput(msg) => assert_eq!(msg, "email is required"),
        other => panic!("Expected CollabError::InvalidInput, got {}", other),
    }
}

#[test]
fn test_http_error_prefers_server_message() {
    let error = CollabError::Http {
        status: 400,
        message: Some("Team name taken".to_string()),
        error: Some("duplicate".to_string()),
    };
    assert_eq!(error.status(), Some(400));
    assert_eq!(error.message_or_text(), "Team name taken");
    assert_eq!(error.error_or_text(), "duplicate");
    assert_eq!(error.to_string(), "HTTP 400: Team name taken");
}

#[test]
fn test_http_error_without_body_falls_back_to_text() {
    let error = CollabError::Http { status: 500, message: None, error: None };
    assert_eq!(error.message_or_text(), "HTTP 500: request failed");
    assert_eq!(error.error_or_text(), "HTTP 500: request failed");
}

#[test]
fn test_unauthorized_carries_status_and_message() {
    let error = CollabError::Unauthorized { message: Some("Invalid credentials".to_string()) };
    assert_eq!(error.status(), Some(401));
    assert_eq!(error.server_message(), Some("Invalid credentials"));
    assert_eq!(CollabError::NoToken.status(), None);
}
