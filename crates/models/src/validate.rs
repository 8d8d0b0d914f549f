//! Field-level payload checks shared by the entity modules.

use crate::errors::ModelError;

pub fn require_non_empty(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    Ok(())
}

/// Absolute http(s) URL with a host.
pub fn require_http_url(field: &str, value: &str) -> Result<(), ModelError> {
    let parsed = url::Url::parse(value.trim())
        .map_err(|e| ModelError::Validation(format!("{field} must be a valid URL: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ModelError::Validation(format!("{field} must be an http(s) URL")));
    }
    Ok(())
}
