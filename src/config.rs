// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const URL_VAR: &str = "CASAFIN_URL";
pub const ANON_KEY_VAR: &str = "CASAFIN_ANON_KEY";

/// Connection parameters for the hosted backend. Absent configuration puts
/// the whole application into offline mode instead of failing.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub url: String,
    pub anon_key: String,
}

impl RemoteConfig {
    pub fn from_env() -> Option<Self> {
        let url = std::env::var(URL_VAR).ok()?;
        let anon_key = std::env::var(ANON_KEY_VAR).ok()?;
        if url.trim().is_empty() || anon_key.trim().is_empty() {
            return None;
        }
        Some(RemoteConfig {
            url: url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }
}

pub fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from("app.casafin", "Casafin", "casafin")
        .context("Could not determine platform-specific data dir")?;
    let dir = proj.data_dir().to_path_buf();
    fs::create_dir_all(&dir).context("Failed to create data dir")?;
    Ok(dir)
}

pub fn session_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("session.json"))
}

fn settings_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("settings.json"))
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Settings {
    #[serde(default)]
    language: Option<String>,
}

fn read_settings() -> Settings {
    settings_path()
        .ok()
        .and_then(|p| fs::read_to_string(p).ok())
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}

/// The durable display-language marker. Defaults to pt-BR.
pub fn language() -> String {
    read_settings().language.unwrap_or_else(|| "pt-BR".to_string())
}

pub fn set_language(lang: &str) -> Result<()> {
    let mut s = read_settings();
    s.language = Some(lang.to_string());
    fs::write(settings_path()?, serde_json::to_string_pretty(&s)?)
        .context("Failed to write settings")?;
    Ok(())
}
