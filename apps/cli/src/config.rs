use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use client_core::{
    config::{DEFAULT_API_BASE_URL, DEFAULT_AUTH_BASE_URL},
    ClientConfig, StartupPolicy,
};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "mesto.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub auth_url: String,
    pub api_token: Option<String>,
    pub store_url: String,
    pub startup_policy: StartupPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_BASE_URL.into(),
            auth_url: DEFAULT_AUTH_BASE_URL.into(),
            api_token: None,
            store_url: default_store_url(),
            startup_policy: StartupPolicy::default(),
        }
    }
}

impl Settings {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_base_url: self.api_url.clone(),
            auth_base_url: self.auth_url.clone(),
            api_token: self.api_token.clone(),
            startup: self.startup_policy,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_url: Option<String>,
    auth_url: Option<String>,
    api_token: Option<String>,
    store: Option<String>,
    startup_policy: Option<StartupPolicy>,
}

/// Defaults, then the toml file, then environment overrides.
///
/// An explicitly requested file must exist; the default `mesto.toml` is optional.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let raw = match config_path {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?,
        ),
        None => fs::read_to_string(DEFAULT_CONFIG_FILE).ok(),
    };
    settings_from(raw.as_deref(), |key| std::env::var(key).ok())
}

pub(crate) fn settings_from(
    raw_file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = raw_file {
        let file_cfg: FileConfig = toml::from_str(raw).context("failed to parse config file")?;
        if let Some(v) = file_cfg.api_url {
            settings.api_url = v;
        }
        if let Some(v) = file_cfg.auth_url {
            settings.auth_url = v;
        }
        if let Some(v) = file_cfg.api_token {
            settings.api_token = Some(v);
        }
        if let Some(v) = file_cfg.store {
            settings.store_url = v;
        }
        if let Some(v) = file_cfg.startup_policy {
            settings.startup_policy = v;
        }
    }

    if let Some(v) = env("MESTO_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = env("MESTO_AUTH_URL") {
        settings.auth_url = v;
    }
    if let Some(v) = env("APP__AUTH_URL") {
        settings.auth_url = v;
    }

    if let Some(v) = env("MESTO_API_TOKEN") {
        settings.api_token = Some(v);
    }
    if let Some(v) = env("APP__API_TOKEN") {
        settings.api_token = Some(v);
    }
    if settings.api_token.as_deref().is_some_and(|t| t.trim().is_empty()) {
        settings.api_token = None;
    }

    if let Some(v) = env("MESTO_STORE") {
        settings.store_url = v;
    }
    if let Some(v) = env("APP__STORE") {
        settings.store_url = v;
    }
    if settings.store_url.trim().is_empty() {
        settings.store_url = default_store_url();
    }

    if let Some(v) = env("APP__STARTUP_POLICY") {
        settings.startup_policy = v
            .parse()
            .map_err(|err: String| anyhow!(err))
            .context("invalid APP__STARTUP_POLICY")?;
    }

    Ok(settings)
}

fn default_store_url() -> String {
    let dir = dirs::data_dir()
        .map(|dir| dir.join("mesto"))
        .unwrap_or_else(|| PathBuf::from("./data"));
    let path = dir.join("session.db");
    format!("sqlite://{}", path.display().to_string().replace('\\', "/"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
