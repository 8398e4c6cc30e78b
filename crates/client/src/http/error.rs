//! Raw transport failures and their normalization
//!
//! [`TransportError`] is the tagged form of everything that can go wrong
//! between building a request and decoding its body. [`normalize`] folds a
//! transport error into the shared [`ApiError`] taxonomy with an operation
//! context, producing the one user-visible `"<context>: <detail>"` string.

use campus_domain::ApiError;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::warn;

/// Detail string used when the server sent a status but nothing usable
const GENERIC_SERVER_DETAIL: &str = "server error";
/// Detail string for every no-response failure
const NO_RESPONSE_DETAIL: &str = "no response from server, check your connection";

/// Low-level failure of one HTTP exchange
#[derive(Debug, Error)]
pub enum TransportError {
    /// A response arrived with a non-2xx status; `message` is the body's
    /// message field when one could be extracted
    #[error("status {status}: {message:?}")]
    Status { status: StatusCode, message: Option<String> },

    /// The request was sent but no response arrived in time
    #[error("request timed out")]
    Timeout,

    /// The request could not reach the server at all
    #[error("connection failed: {0}")]
    Connect(String),

    /// A 2xx body could not be decoded into the expected type
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The request was never dispatched (bad URL, unserializable part, ...)
    #[error("failed to build request: {0}")]
    Build(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() || err.is_request() {
            Self::Connect(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_builder() {
            Self::Build(err.to_string())
        } else {
            Self::Connect(err.to_string())
        }
    }
}

/// Classify and re-label a transport failure with operation context.
///
/// Precedence, first match wins:
/// 1. a response was received → detail from its body message, else the
///    HTTP reason phrase, else a generic string; kind `Server`, or
///    `NotFound` for a 404
/// 2. the request was sent but nothing came back → fixed no-response
///    detail, kind `Network`
/// 3. anything else → the underlying message, kind `Unknown`
///
/// Logs the raw error before mapping; never fails itself.
pub fn normalize(err: TransportError, context: &str) -> ApiError {
    warn!(context, error = %err, "request failed");

    match err {
        TransportError::Status { status, message } => {
            let detail = message
                .filter(|m| !m.trim().is_empty())
                .or_else(|| status.canonical_reason().map(str::to_owned))
                .unwrap_or_else(|| GENERIC_SERVER_DETAIL.to_string());
            let message = format!("{context}: {detail}");
            if status == StatusCode::NOT_FOUND {
                ApiError::NotFound(message)
            } else {
                ApiError::Server(message)
            }
        }
        TransportError::Timeout | TransportError::Connect(_) => {
            ApiError::Network(format!("{context}: {NO_RESPONSE_DETAIL}"))
        }
        TransportError::Decode(detail) | TransportError::Build(detail) => {
            ApiError::Unknown(format!("{context}: {detail}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use campus_domain::ErrorKind;

    use super::*;

    #[test]
    fn test_status_with_body_message() {
        let err = TransportError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: Some("database unavailable".into()),
        };
        let normalized = normalize(err, "List Courses");
        assert_eq!(normalized.kind(), ErrorKind::Server);
        assert_eq!(normalized.to_string(), "List Courses: database unavailable");
    }

    #[test]
    fn test_status_falls_back_to_reason_phrase() {
        let err = TransportError::Status { status: StatusCode::BAD_GATEWAY, message: None };
        let normalized = normalize(err, "Get Course");
        assert_eq!(normalized.to_string(), "Get Course: Bad Gateway");
    }

    #[test]
    fn test_blank_body_message_is_ignored() {
        let err = TransportError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: Some("   ".into()),
        };
        let normalized = normalize(err, "Get Course");
        assert_eq!(normalized.to_string(), "Get Course: Internal Server Error");
    }

    #[test]
    fn test_404_maps_to_not_found() {
        let err = TransportError::Status { status: StatusCode::NOT_FOUND, message: None };
        assert_eq!(normalize(err, "Get Role").kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_timeout_and_connect_map_to_network() {
        let normalized = normalize(TransportError::Timeout, "Update Group");
        assert_eq!(normalized.kind(), ErrorKind::Network);
        assert_eq!(
            normalized.to_string(),
            "Update Group: no response from server, check your connection"
        );

        let normalized = normalize(TransportError::Connect("refused".into()), "Update Group");
        assert_eq!(normalized.kind(), ErrorKind::Network);
    }

    #[test]
    fn test_everything_else_maps_to_unknown() {
        let normalized = normalize(TransportError::Build("bad url".into()), "Create Course");
        assert_eq!(normalized.kind(), ErrorKind::Unknown);
        assert_eq!(normalized.to_string(), "Create Course: bad url");
    }
}
