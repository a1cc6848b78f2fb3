use std::sync::Arc;

use storage::KeyValueStore;
use tracing::{debug, info};

use crate::error::ClientResult;

pub const TOKEN_KEY: &str = "token";
pub const EMAIL_KEY: &str = "email";

/// Authenticated identity held between runs. A token is only ever reported together with an email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub email: Option<String>,
}

impl Session {
    pub fn active(token: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            email: Some(email.into()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.token.is_some()
    }
}

pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self) -> ClientResult<Session> {
        let token = self.store.get(TOKEN_KEY).await?;
        let email = self.store.get(EMAIL_KEY).await?;
        Ok(match (token, email) {
            (Some(token), Some(email)) => Session::active(token, email),
            (_, email) => Session { token: None, email },
        })
    }

    /// Raw token as persisted, even when the email entry is missing.
    pub async fn stored_token(&self) -> ClientResult<Option<String>> {
        Ok(self.store.get(TOKEN_KEY).await?)
    }

    pub async fn set_active(&self, token: &str, email: &str) -> ClientResult<()> {
        // Email goes first so a torn write never yields a token without one.
        self.store.set(EMAIL_KEY, email).await?;
        self.store.set(TOKEN_KEY, token).await?;
        info!(email, "session activated");
        Ok(())
    }

    pub async fn refresh_email(&self, email: &str) -> ClientResult<()> {
        self.store.set(EMAIL_KEY, email).await?;
        debug!(email, "session email refreshed");
        Ok(())
    }

    pub async fn clear(&self) -> ClientResult<()> {
        self.store.remove(TOKEN_KEY).await?;
        self.store.remove(EMAIL_KEY).await?;
        info!("session cleared");
        Ok(())
    }

    pub async fn is_active(&self) -> ClientResult<bool> {
        Ok(self.get().await?.is_active())
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
