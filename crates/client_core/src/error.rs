use std::fmt;

use reqwest::Method;
use shared::error::ErrorCode;
use thiserror::Error;

/// Form field a client-side check rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
    Name,
    About,
    PhotoName,
    ImageUrl,
    AvatarUrl,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Email => "email",
            Field::Password => "password",
            Field::Name => "name",
            Field::About => "about",
            Field::PhotoName => "photo name",
            Field::ImageUrl => "image link",
            Field::AvatarUrl => "avatar link",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(Field),
    #[error("{field} is invalid: {reason}")]
    Invalid { field: Field, reason: String },
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::Missing(field) => *field,
            ValidationError::Invalid { field, .. } => *field,
        }
    }
}

/// Non-2xx response from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{method} {url} failed with status {status}{}", message_suffix(.message))]
pub struct HttpError {
    pub status: u16,
    pub method: Method,
    pub url: String,
    pub message: Option<String>,
}

impl HttpError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::from_status(self.status)
    }
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|message| format!(": {message}"))
        .unwrap_or_default()
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("network failure on {method} {url}: {message}")]
    Network {
        method: Method,
        url: String,
        message: String,
    },
    #[error("unexpected response from {url}: {message}")]
    Decode { url: String, message: String },
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
    #[error("{action} is not available: {reason}")]
    InvalidState {
        action: &'static str,
        reason: String,
    },
}

impl ClientError {
    pub(crate) fn invalid_state(action: &'static str, reason: impl Into<String>) -> Self {
        ClientError::InvalidState {
            action,
            reason: reason.into(),
        }
    }

    /// Backend or transport failure; callers treat both the same way.
    pub fn is_remote(&self) -> bool {
        matches!(self, ClientError::Http(_) | ClientError::Network { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http(error) => Some(error.status),
            _ => None,
        }
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
