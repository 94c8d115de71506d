//! Error types for the Hailo API client.
//!
//! # Design
//! Failures are split by where they happen: the caller's credentials, the
//! transport, the HTTP status line, and the body. Only an exact 200 counts as
//! success; every other status lands in `Http` with the raw body so the caller
//! can inspect whatever the API sent back.

use thiserror::Error;

/// Errors returned by `HailoClient` operations.
#[derive(Debug, Error)]
pub enum HailoError {
    /// An empty API key was supplied at construction or to `set_api_key`.
    #[error("Invalid apiKey")]
    InvalidCredential,

    /// The transport produced no response (connection refused, timeout, ...).
    #[error("No response: {0}")]
    Transport(String),

    /// The server answered with a status other than 200.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// A non-empty body could not be parsed as JSON.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for HailoError {
    fn from(err: reqwest::Error) -> Self {
        HailoError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for HailoError {
    fn from(err: serde_json::Error) -> Self {
        HailoError::InvalidResponse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HailoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_credential_display() {
        assert_eq!(HailoError::InvalidCredential.to_string(), "Invalid apiKey");
    }

    #[test]
    fn http_error_display_carries_body() {
        let err = HailoError::Http {
            status: 404,
            body: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn serde_json_error_maps_to_invalid_response() {
        let parsed: std::result::Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: HailoError = parsed.unwrap_err().into();
        assert!(matches!(err, HailoError::InvalidResponse(_)));
        assert!(err.to_string().starts_with("Invalid response"));
    }
}
