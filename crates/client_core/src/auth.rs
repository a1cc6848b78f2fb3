use std::sync::Arc;

use shared::protocol::{Credentials, Identity, IdentityEnvelope, TokenResponse};
use tracing::{info, warn};

use crate::{
    error::{ClientError, ClientResult},
    session::{Session, SessionStore},
    transport::{call, ApiRequest, Transport},
    validation,
};

/// Identity endpoints: account creation, sign-in and token confirmation.
pub struct AuthService {
    transport: Arc<dyn Transport>,
    sessions: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(transport: Arc<dyn Transport>, sessions: Arc<SessionStore>) -> Self {
        Self {
            transport,
            sessions,
        }
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub async fn register(&self, email: &str, password: &str) -> ClientResult<Identity> {
        let email = validation::credentials(email, password)?;
        let request = ApiRequest::post("/signup").json(&Credentials {
            email,
            password: password.to_string(),
        })?;
        let envelope: IdentityEnvelope = call(self.transport.as_ref(), request).await?;
        info!(email = %envelope.data.email, "account registered");
        Ok(envelope.data)
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> ClientResult<Session> {
        let email = validation::credentials(email, password)?;
        let request = ApiRequest::post("/signin").json(&Credentials {
            email: email.clone(),
            password: password.to_string(),
        })?;
        let response: TokenResponse = call(self.transport.as_ref(), request).await?;
        if response.token.is_empty() {
            return Err(ClientError::Decode {
                url: "/signin".into(),
                message: "empty token in sign-in response".into(),
            });
        }

        self.sessions.set_active(&response.token, &email).await?;
        Ok(Session::active(response.token, email))
    }

    /// Confirms a persisted token with the backend. Any failure reads as "not signed in".
    pub async fn validate_existing_token(&self) -> Option<Identity> {
        let token = match self.sessions.stored_token().await {
            Ok(Some(token)) => token,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, "could not read stored session");
                return None;
            }
        };

        let request = ApiRequest::get("/users/me").bearer(token);
        match call::<IdentityEnvelope>(self.transport.as_ref(), request).await {
            Ok(envelope) => {
                if let Err(err) = self.sessions.refresh_email(&envelope.data.email).await {
                    warn!(error = %err, "could not persist confirmed email");
                    return None;
                }
                info!(email = %envelope.data.email, "stored session confirmed");
                Some(envelope.data)
            }
            Err(ClientError::Http(http)) if http.code().is_auth_rejection() => {
                warn!(status = http.status, "stored token rejected; discarding it");
                if let Err(err) = self.sessions.clear().await {
                    warn!(error = %err, "could not discard rejected session");
                }
                None
            }
            Err(err) => {
                warn!(error = %err, "stored token could not be confirmed");
                None
            }
        }
    }

    pub async fn log_out(&self) -> ClientResult<()> {
        self.sessions.clear().await
    }
}

#[cfg(test)]
#[path = "tests/auth_tests.rs"]
mod tests;
