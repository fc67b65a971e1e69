//! Error types for the REST client.
//!
//! # Design
//! A call fails in exactly one of two ways: no usable response came back
//! (`Transport`), or a response came back with a status outside 200–299
//! (`HttpStatus`). Callers branch on the variant and on the preserved
//! status code, never on message text.
//!
//! Configuration problems are a separate type because they only happen
//! while the client is being constructed.

use serde_json::Value;
use thiserror::Error;

/// Errors returned by `RestClient` calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was obtained: DNS, connection, timeout, an unreadable
    /// body, or a success body that is not valid JSON.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The server answered with a non-2xx status. `body` holds the decoded
    /// JSON error body when the server sent one.
    #[error("HTTP status {code}")]
    HttpStatus { code: u16, body: Option<Value> },
}

impl ApiError {
    pub(crate) fn transport(message: impl Into<String>) -> Self {
        ApiError::Transport {
            message: message.into(),
        }
    }

    /// Status code of an `HttpStatus` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { code, .. } => Some(*code),
            ApiError::Transport { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Errors raised while building configuration or installing logging.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API_BASE_URL is not set")]
    MissingBaseUrl,

    #[error("invalid base URL '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    #[error("logging setup failed: {message}")]
    Logging { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_exposed_only_for_http_errors() {
        let err = ApiError::HttpStatus {
            code: 404,
            body: None,
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());

        let err = ApiError::transport("connection refused");
        assert_eq!(err.status(), None);
        assert!(!err.is_not_found());
    }

    #[test]
    fn messages_carry_the_cause() {
        let err = ApiError::HttpStatus {
            code: 500,
            body: None,
        };
        assert_eq!(err.to_string(), "HTTP status 500");
        let err = ApiError::transport("dns lookup failed");
        assert_eq!(err.to_string(), "transport error: dns lookup failed");
    }
}
