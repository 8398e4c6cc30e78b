//! Error taxonomy shared by every facade operation
//!
//! Every failure that crosses the facade boundary is one of five kinds.
//! Normalized messages always read `"<context>: <detail>"`, where the
//! context names the operation ("Create Course", "List Roles", ...).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kinds of facade errors, used by callers to branch on failure class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Bad input, rejected before any I/O was attempted
    Validation,
    /// Valid request, but the resource does not exist (404 or empty body)
    NotFound,
    /// The server answered with a non-2xx status
    Server,
    /// The request was sent but no response arrived (timeout, network down)
    Network,
    /// Anything else (request never dispatched, decode failure, ...)
    Unknown,
}

/// Main error type for facade operations
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message")]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Unknown(String),
}

impl ApiError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Server(_) => ErrorKind::Server,
            Self::Network(_) => ErrorKind::Network,
            Self::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// Build a validation error with the standard `"<context>: <detail>"` message
    pub fn validation(context: &str, detail: impl AsRef<str>) -> Self {
        Self::Validation(format!("{}: {}", context, detail.as_ref()))
    }

    /// Build a not-found error with the standard `"<context>: <detail>"` message
    pub fn not_found(context: &str, detail: impl AsRef<str>) -> Self {
        Self::NotFound(format!("{}: {}", context, detail.as_ref()))
    }
}

/// Result type alias for facade operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(ApiError::Validation("x".into()).kind(), ErrorKind::Validation);
        assert_eq!(ApiError::NotFound("x".into()).kind(), ErrorKind::NotFound);
        assert_eq!(ApiError::Server("x".into()).kind(), ErrorKind::Server);
        assert_eq!(ApiError::Network("x".into()).kind(), ErrorKind::Network);
        assert_eq!(ApiError::Unknown("x".into()).kind(), ErrorKind::Unknown);
    }

    #[test]
    fn test_message_format() {
        let err = ApiError::validation("Create Course", "title must not be empty");
        assert_eq!(err.to_string(), "Create Course: title must not be empty");

        let err = ApiError::not_found("Get Role", "role not found");
        assert_eq!(err.to_string(), "Get Role: role not found");
    }
}
