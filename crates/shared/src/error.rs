use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Internal,
    Unknown,
}

impl ErrorCode {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorCode::BadRequest,
            401 => ErrorCode::Unauthorized,
            403 => ErrorCode::Forbidden,
            404 => ErrorCode::NotFound,
            409 => ErrorCode::Conflict,
            500..=599 => ErrorCode::Internal,
            _ => ErrorCode::Unknown,
        }
    }

    /// Whether the backend rejected the caller's credentials or token.
    pub fn is_auth_rejection(self) -> bool {
        matches!(self, ErrorCode::BadRequest | ErrorCode::Unauthorized)
    }
}

/// Error body the backend sends with non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, alias = "error")]
    pub message: Option<String>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Extracts the message from a raw response body, if it is a JSON error object.
    pub fn message_from_body(body: &str) -> Option<String> {
        serde_json::from_str::<ApiError>(body)
            .ok()
            .and_then(|error| error.message)
            .filter(|message| !message.trim().is_empty())
    }
}
