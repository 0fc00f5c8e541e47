// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Deserialize;
use serde_json::Value;

use crate::config::RemoteConfig;
use crate::utils::http_client;

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("remote store is not configured (set CASAFIN_URL and CASAFIN_ANON_KEY)")]
    Unconfigured,
    #[error("remote call failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("auth rejected: {0}")]
    Auth(String),
    #[error("could not decode remote payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The per-entity tables of the hosted store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Users,
    Categories,
    Cards,
    Goals,
    FixedEntries,
    Transactions,
    Assets,
    Investments,
    MonthConfigs,
}

impl Table {
    pub fn as_str(self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Categories => "categories",
            Table::Cards => "cards",
            Table::Goals => "goals",
            Table::FixedEntries => "fixed_entries",
            Table::Transactions => "transactions",
            Table::Assets => "assets",
            Table::Investments => "investments",
            Table::MonthConfigs => "month_configs",
        }
    }
}

/// The eight household-data tables the store bulk-loads and pushes. `users`
/// is managed by the session layer, not the store.
pub const DATA_TABLES: [Table; 8] = [
    Table::Categories,
    Table::Cards,
    Table::Goals,
    Table::FixedEntries,
    Table::Transactions,
    Table::Assets,
    Table::Investments,
    Table::MonthConfigs,
];

/// Seam between the data store and the hosted service, so the sync layer can
/// be exercised against an in-memory backend in tests and a null backend in
/// offline mode.
pub trait Backend: Send + Sync {
    fn fetch_owned(&self, table: Table, owner_id: &str) -> Result<Vec<Value>, RemoteError>;
    fn upsert_rows(&self, table: Table, rows: &[Value]) -> Result<(), RemoteError>;
    fn delete_row(&self, table: Table, id: &str) -> Result<(), RemoteError>;
}

/// Offline mode: every read is empty, every write a silent no-op.
pub struct NullBackend;

impl Backend for NullBackend {
    fn fetch_owned(&self, _table: Table, _owner_id: &str) -> Result<Vec<Value>, RemoteError> {
        Ok(Vec::new())
    }
    fn upsert_rows(&self, _table: Table, _rows: &[Value]) -> Result<(), RemoteError> {
        Ok(())
    }
    fn delete_row(&self, _table: Table, _id: &str) -> Result<(), RemoteError> {
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

#[derive(Debug, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Typed client over the hosted relational store and its auth subsystem
/// (PostgREST/GoTrue conventions).
#[derive(Clone)]
pub struct RemoteClient {
    cfg: RemoteConfig,
    http: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(cfg: RemoteConfig) -> anyhow::Result<Self> {
        Ok(RemoteClient {
            cfg,
            http: http_client()?,
        })
    }

    fn rest_url(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.cfg.url, table.as_str())
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.cfg.url, path)
    }

    fn with_keys(&self, req: reqwest::blocking::RequestBuilder) -> reqwest::blocking::RequestBuilder {
        req.header("apikey", &self.cfg.anon_key)
            .bearer_auth(&self.cfg.anon_key)
    }

    /// Filtered read-all: `SELECT * FROM <table> WHERE <column> = <value>`.
    pub fn select_eq(
        &self,
        table: Table,
        column: &str,
        value: &str,
    ) -> Result<Vec<Value>, RemoteError> {
        let resp = self
            .with_keys(self.http.get(self.rest_url(table)))
            .query(&[(column, format!("eq.{}", value)), ("select", "*".to_string())])
            .send()?
            .error_for_status()?;
        Ok(resp.json()?)
    }

    // ---- auth subsystem ----

    pub fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, RemoteError> {
        let resp = self
            .with_keys(self.http.post(self.auth_url("signup")))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()?;
        if !resp.status().is_success() {
            return Err(RemoteError::Auth(auth_error_text(resp)));
        }
        let v: Value = resp.json()?;
        // Signup responses nest the user when a session is issued immediately.
        let user = v.get("user").cloned().unwrap_or(v);
        Ok(serde_json::from_value(user)?)
    }

    pub fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, RemoteError> {
        let resp = self
            .with_keys(self.http.post(self.auth_url("token")))
            .query(&[("grant_type", "password")])
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()?;
        if !resp.status().is_success() {
            return Err(RemoteError::Auth(auth_error_text(resp)));
        }
        Ok(resp.json()?)
    }

    pub fn sign_out(&self) -> Result<(), RemoteError> {
        self.with_keys(self.http.post(self.auth_url("logout")))
            .send()?
            .error_for_status()?;
        Ok(())
    }

    pub fn request_recovery(&self, email: &str) -> Result<(), RemoteError> {
        let resp = self
            .with_keys(self.http.post(self.auth_url("recover")))
            .json(&serde_json::json!({ "email": email }))
            .send()?;
        if !resp.status().is_success() {
            return Err(RemoteError::Auth(auth_error_text(resp)));
        }
        Ok(())
    }
}

fn auth_error_text(resp: reqwest::blocking::Response) -> String {
    let status = resp.status();
    let body = resp.text().unwrap_or_default();
    let detail = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| {
            v.get("msg")
                .or_else(|| v.get("error_description"))
                .or_else(|| v.get("message"))
                .and_then(|m| m.as_str().map(String::from))
        })
        .unwrap_or(body);
    format!("{} {}", status, detail)
}

impl Backend for RemoteClient {
    fn fetch_owned(&self, table: Table, owner_id: &str) -> Result<Vec<Value>, RemoteError> {
        self.select_eq(table, "owner_id", owner_id)
    }

    fn upsert_rows(&self, table: Table, rows: &[Value]) -> Result<(), RemoteError> {
        if rows.is_empty() {
            return Ok(());
        }
        self.with_keys(self.http.post(self.rest_url(table)))
            .query(&[("on_conflict", "id")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(rows)
            .send()?
            .error_for_status()?;
        Ok(())
    }

    fn delete_row(&self, table: Table, id: &str) -> Result<(), RemoteError> {
        self.with_keys(self.http.delete(self.rest_url(table)))
            .query(&[("id", format!("eq.{}", id))])
            .send()?
            .error_for_status()?;
        Ok(())
    }
}
