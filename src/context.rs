// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::sync::Arc;

use crate::config::{self, RemoteConfig};
use crate::models::{Permissions, User};
use crate::remote::{Backend, NullBackend, RemoteClient};
use crate::session::SessionManager;
use crate::store::DataStore;

/// Everything a command needs, constructed once in `main` and torn down with
/// the process. There is no ambient global state; the session and the store
/// travel through this handle.
pub struct AppContext {
    pub session: SessionManager,
    pub store: DataStore,
}

impl AppContext {
    pub fn from_env() -> Result<Self> {
        let remote = match RemoteConfig::from_env() {
            Some(cfg) => Some(RemoteClient::new(cfg)?),
            None => None,
        };
        let backend: Arc<dyn Backend> = match &remote {
            Some(client) => Arc::new(client.clone()),
            None => Arc::new(NullBackend),
        };
        let session = SessionManager::new(remote, config::session_path()?);
        let mut store = DataStore::new(backend);
        if let Some(owner) = session.current().map(|u| u.owner_id().to_string()) {
            store.attach(&owner);
        }
        Ok(AppContext { session, store })
    }

    pub fn require_user(&self) -> Result<&User> {
        self.session
            .current()
            .ok_or_else(|| anyhow::anyhow!("Not logged in. Run 'casafin auth login' first."))
    }

    /// Responsible users hold every capability; dependents are checked
    /// against their granted set.
    pub fn require_permission(
        &self,
        what: &str,
        has: impl Fn(&Permissions) -> bool,
    ) -> Result<()> {
        let user = self.require_user()?;
        if user.is_responsible() || has(&user.permissions) {
            Ok(())
        } else {
            Err(anyhow::anyhow!("You don't have permission to {}", what))
        }
    }
}
