// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{TimeZone, Utc};
use fintrack::models::User;
use fintrack::session::SessionStore;

fn user() -> User {
    User {
        id: "u1".to_string(),
        email: "me@example.com".to_string(),
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    }
}

#[test]
fn login_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = SessionStore::load_from(path.clone());
    assert!(!store.is_authenticated());
    store.login("tok-123".to_string(), user()).unwrap();
    assert!(store.is_authenticated());
    assert_eq!(store.token().as_deref(), Some("tok-123"));

    let reopened = SessionStore::load_from(path);
    assert!(reopened.is_authenticated());
    assert_eq!(reopened.token().as_deref(), Some("tok-123"));
    assert_eq!(reopened.user().unwrap().email, "me@example.com");
}

#[test]
fn persisted_user_without_token_is_discarded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(
        &path,
        serde_json::json!({
            "token": null,
            "user": {
                "id": "u1",
                "email": "me@example.com",
                "created_at": "2025-01-01T00:00:00Z",
            },
        })
        .to_string(),
    )
    .unwrap();

    let store = SessionStore::load_from(path);
    assert!(!store.is_authenticated());
    assert!(store.user().is_none());
}

#[test]
fn corrupt_file_yields_logged_out_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").unwrap();

    let store = SessionStore::load_from(path);
    assert!(!store.is_authenticated());
    assert!(store.token().is_none());
}

#[test]
fn logout_removes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = SessionStore::load_from(path.clone());
    store.login("tok-123".to_string(), user()).unwrap();
    assert!(path.exists());

    store.logout().unwrap();
    assert!(!path.exists());
    assert!(!store.is_authenticated());
    assert!(store.user().is_none());
}

#[test]
fn expire_clears_state_and_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = SessionStore::load_from(path.clone());
    store.login("tok-123".to_string(), user()).unwrap();

    store.expire();
    assert!(!store.is_authenticated());
    assert!(store.user().is_none());
    assert!(!path.exists());
}
