//! Client-side form checks. Nothing here touches the network.

use url::Url;

use crate::error::{Field, ValidationError};

pub fn credentials(email: &str, password: &str) -> Result<String, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::Missing(Field::Email));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {}
        _ => {
            return Err(ValidationError::Invalid {
                field: Field::Email,
                reason: "expected an address like name@example.com".into(),
            })
        }
    }
    if password.is_empty() {
        return Err(ValidationError::Missing(Field::Password));
    }
    Ok(email.to_string())
}

/// Trimmed value; any non-blank text is accepted.
pub fn text(field: Field, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(value.to_string())
}

pub fn link(field: Field, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    let parsed = Url::parse(value).map_err(|err| ValidationError::Invalid {
        field,
        reason: err.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationError::Invalid {
            field,
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(value.to_string())
}
