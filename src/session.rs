// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Identity and session management. A session is either anonymous or
//! authenticated; it becomes authenticated on a successful login or on
//! replay of the persisted session marker at startup, and anonymous again on
//! logout. Remote-call failures never escape as errors here — they are
//! logged and folded into boolean or structured results — with one
//! exception: registration propagates its failures.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::mapping::{user_from_row, user_to_row};
use crate::models::{Permissions, Role, User};
use crate::remote::{Backend, RemoteClient, RemoteError, Table};
use crate::utils::valid_email;

#[derive(Debug)]
pub struct ResetOutcome {
    pub success: bool,
    pub error: Option<String>,
}

pub struct SessionManager {
    remote: Option<RemoteClient>,
    session_path: PathBuf,
    current: Option<User>,
}

impl SessionManager {
    /// Replays the persisted session marker, if one survives from a previous
    /// run.
    pub fn new(remote: Option<RemoteClient>, session_path: PathBuf) -> Self {
        let current = fs::read_to_string(&session_path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok());
        SessionManager {
            remote,
            session_path,
            current,
        }
    }

    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    fn persist_current(&self) {
        let Some(user) = &self.current else { return };
        match serde_json::to_string_pretty(user) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.session_path, json) {
                    log::warn!("could not persist session marker: {}", e);
                }
            }
            Err(e) => log::warn!("could not serialize session marker: {}", e),
        }
    }

    fn lookup_by(&self, column: &str, value: &str) -> Option<User> {
        let remote = self.remote.as_ref()?;
        match remote.select_eq(Table::Users, column, value) {
            Ok(rows) => rows.into_iter().next().and_then(|v| match user_from_row(v) {
                Ok(u) => Some(u),
                Err(e) => {
                    log::warn!("undecodable user row: {}", e);
                    None
                }
            }),
            Err(e) => {
                log::warn!("user lookup by {} failed: {}", column, e);
                None
            }
        }
    }

    /// Exchange a login handle for its backing email, verify the credential
    /// with the auth subsystem, and mark the profile current. Lookup and
    /// network failures come back as `false`, never as an error.
    pub fn login(&mut self, handle: &str, secret: &str) -> bool {
        let Some(remote) = self.remote.clone() else {
            log::warn!("login attempted with no remote configured");
            return false;
        };
        let Some(profile) = self.lookup_by("login", handle) else {
            return false;
        };
        match remote.sign_in_with_password(&profile.email, secret) {
            Ok(_) => {
                self.current = Some(profile);
                self.persist_current();
                true
            }
            Err(e) => {
                log::warn!("sign-in for '{}' failed: {}", handle, e);
                false
            }
        }
    }

    /// Invalidate the remote session (best-effort) and clear the persisted
    /// marker.
    pub fn logout(&mut self) {
        if let Some(remote) = &self.remote {
            if let Err(e) = remote.sign_out() {
                log::warn!("remote sign-out failed: {}", e);
            }
        }
        if let Err(e) = fs::remove_file(&self.session_path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("could not clear session marker: {}", e);
            }
        }
        self.current = None;
    }

    /// The one path where failures propagate: an unconfigured remote, a
    /// rejected signup, or a failed profile-row insert all surface as errors.
    pub fn register(&mut self, profile: User, password: &str) -> Result<()> {
        if !valid_email(&profile.email) {
            return Err(anyhow::anyhow!("'{}' is not a valid email", profile.email));
        }
        if profile.handle.trim().is_empty() {
            return Err(anyhow::anyhow!("Login handle must not be empty"));
        }
        if password.len() < 6 {
            return Err(anyhow::anyhow!("Password must have at least 6 characters"));
        }
        if profile.role == Role::Dependent && profile.responsible_id.is_none() {
            return Err(anyhow::anyhow!("A dependent needs a responsible user"));
        }
        if profile.role == Role::Responsible && profile.responsible_id.is_some() {
            return Err(anyhow::anyhow!(
                "A responsible user cannot reference another responsible"
            ));
        }
        let Some(remote) = self.remote.clone() else {
            return Err(RemoteError::Unconfigured.into());
        };
        if self.lookup_by("login", &profile.handle).is_some() {
            return Err(anyhow::anyhow!(
                "Login handle '{}' is already taken",
                profile.handle
            ));
        }
        remote
            .sign_up(&profile.email, password)
            .context("Signup with the auth service failed")?;
        let row = user_to_row(&profile, profile.owner_id());
        remote
            .upsert_rows(Table::Users, &[row])
            .context("Could not store the user profile")?;
        self.current = Some(profile);
        self.persist_current();
        Ok(())
    }

    /// Delegates to the auth subsystem's reset flow. Never fails; the
    /// outcome is structured.
    pub fn request_password_reset(&self, email: &str) -> ResetOutcome {
        if !valid_email(email) {
            return ResetOutcome {
                success: false,
                error: Some(format!("'{}' is not a valid email", email)),
            };
        }
        let Some(remote) = &self.remote else {
            return ResetOutcome {
                success: false,
                error: Some("remote store is not configured".to_string()),
            };
        };
        match remote.request_recovery(email) {
            Ok(()) => ResetOutcome {
                success: true,
                error: None,
            },
            Err(e) => {
                log::warn!("password reset request failed: {}", e);
                ResetOutcome {
                    success: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Every profile of the household, for permission administration.
    /// Failures come back as an empty list.
    pub fn known_users(&self) -> Vec<User> {
        let (Some(remote), Some(current)) = (&self.remote, &self.current) else {
            return Vec::new();
        };
        match remote.select_eq(Table::Users, "owner_id", current.owner_id()) {
            Ok(rows) => rows
                .into_iter()
                .filter_map(|v| match user_from_row(v) {
                    Ok(u) => Some(u),
                    Err(e) => {
                        log::warn!("undecodable user row: {}", e);
                        None
                    }
                })
                .collect(),
            Err(e) => {
                log::warn!("user listing failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Persist a new permission set for a dependent. When the edited user is
    /// the caller's own session, the in-memory identity is refreshed too.
    pub fn update_dependent_permissions(&mut self, user_id: &str, perms: Permissions) -> bool {
        let Some(remote) = self.remote.clone() else {
            return false;
        };
        let Some(mut user) = self.lookup_by("id", user_id) else {
            log::warn!("no user '{}' to update permissions for", user_id);
            return false;
        };
        user.permissions = perms;
        let row = user_to_row(&user, user.owner_id());
        if let Err(e) = remote.upsert_rows(Table::Users, &[row]) {
            log::warn!("permission update for '{}' failed: {}", user_id, e);
            return false;
        }
        if self.current.as_ref().map(|c| c.id.as_str()) == Some(user_id) {
            self.current = Some(user);
            self.persist_current();
        }
        true
    }

    /// Best-effort remote delete; rows owned by that user are not cascaded.
    pub fn delete_user(&mut self, user_id: &str) {
        let Some(remote) = &self.remote else { return };
        if let Err(e) = remote.delete_row(Table::Users, user_id) {
            log::warn!("user delete for '{}' failed: {}", user_id, e);
        }
    }
}
