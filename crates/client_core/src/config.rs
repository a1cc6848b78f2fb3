use std::{fmt, str::FromStr};

use serde::Deserialize;

pub const DEFAULT_API_BASE_URL: &str = "https://mesto.nomoreparties.co/v1/cohort-66";
pub const DEFAULT_AUTH_BASE_URL: &str = "https://auth.nomoreparties.co";

/// Whether profile and gallery fetches wait for a confirmed session at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartupPolicy {
    #[default]
    GatedOnSession,
    Concurrent,
}

impl FromStr for StartupPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gated" | "gated_on_session" => Ok(StartupPolicy::GatedOnSession),
            "concurrent" => Ok(StartupPolicy::Concurrent),
            other => Err(format!("unknown startup policy '{other}'")),
        }
    }
}

impl fmt::Display for StartupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupPolicy::GatedOnSession => f.write_str("gated_on_session"),
            StartupPolicy::Concurrent => f.write_str("concurrent"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub auth_base_url: String,
    /// Fixed authorization value for the gallery API.
    pub api_token: Option<String>,
    pub startup: StartupPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            auth_base_url: DEFAULT_AUTH_BASE_URL.into(),
            api_token: None,
            startup: StartupPolicy::default(),
        }
    }
}
