// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;

use casafin::models::{Permissions, Role, User};
use casafin::session::SessionManager;

fn profile() -> User {
    User {
        id: "u1".to_string(),
        name: "Ana".to_string(),
        handle: "ana".to_string(),
        email: "ana@example.com".to_string(),
        role: Role::Responsible,
        permissions: Permissions::all(),
        responsible_id: None,
    }
}

#[test]
fn a_persisted_session_marker_is_replayed_at_startup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    fs::write(&path, serde_json::to_string(&profile()).unwrap()).unwrap();

    let session = SessionManager::new(None, path);
    assert!(session.is_authenticated());
    assert_eq!(session.current().unwrap().handle, "ana");
}

#[test]
fn a_corrupt_session_marker_falls_back_to_anonymous() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    fs::write(&path, "{ not json").unwrap();

    let session = SessionManager::new(None, path);
    assert!(!session.is_authenticated());
}

#[test]
fn logout_clears_both_the_marker_and_the_identity() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    fs::write(&path, serde_json::to_string(&profile()).unwrap()).unwrap();

    let mut session = SessionManager::new(None, path.clone());
    session.logout();
    assert!(session.current().is_none());
    assert!(!path.exists());

    // A second logout with no marker left is harmless.
    session.logout();
}

#[test]
fn login_without_a_configured_remote_reports_failure_not_panic() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = SessionManager::new(None, dir.path().join("session.json"));
    assert!(!session.login("ana", "secret123"));
    assert!(session.current().is_none());
}

#[test]
fn register_validates_before_touching_the_network() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = SessionManager::new(None, dir.path().join("session.json"));

    let mut bad_email = profile();
    bad_email.email = "not-an-email".to_string();
    assert!(session.register(bad_email, "secret123").is_err());

    assert!(
        session.register(profile(), "12345").is_err(),
        "five characters is below the password floor"
    );

    let mut orphan = profile();
    orphan.role = Role::Dependent;
    orphan.responsible_id = None;
    assert!(session.register(orphan, "secret123").is_err());

    let mut double_head = profile();
    double_head.responsible_id = Some("u0".to_string());
    assert!(session.register(double_head, "secret123").is_err());

    // A valid profile still fails offline, with the unconfigured error.
    let err = session.register(profile(), "secret123").unwrap_err();
    assert!(err.to_string().contains("not configured"));
}

#[test]
fn password_reset_reports_a_structured_outcome_offline() {
    let dir = tempfile::tempdir().unwrap();
    let session = SessionManager::new(None, dir.path().join("session.json"));

    let outcome = session.request_password_reset("ana@example.com");
    assert!(!outcome.success);
    assert!(outcome.error.is_some());

    let outcome = session.request_password_reset("not-an-email");
    assert!(!outcome.success);
    assert!(outcome.error.unwrap().contains("not a valid email"));
}

#[test]
fn known_users_is_empty_without_a_remote() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    fs::write(&path, serde_json::to_string(&profile()).unwrap()).unwrap();

    let session = SessionManager::new(None, path);
    assert!(session.known_users().is_empty());
}
