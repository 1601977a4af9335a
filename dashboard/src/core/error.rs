//! # Common Error Types
//!
//! Error handling for the dashboard client.
//!
//! ## Error Layers
//!
//! - **[`FailureKind`]**: The four transport-level outcome kinds every request is classified
//!   into (`Unauthorized`, `ServerError`, `Timeout`, `NetworkUnreachable`).
//! - **[`RequestError`]**: A failed mutating action. Writes never fall back to defaults, so
//!   this is what presentation code sees when a create/update/delete fails.
//! - **[`AppError`]**: Crate-wide error for configuration, storage, decoding, and HTTP client setup.
//!
//! Dashboard reads never produce any of these at the presentation boundary; a failed
//! section is replaced by its fallback and annotated instead.
//!
//! ## Usage Pattern
//!
//! ```rust,no_run
//! use dashboard::core::error::{AppError, Result};
//!
//! fn parse_timeout(raw: &str) -> Result<u64> {
//!     raw.parse()
//!         .map_err(|_| AppError::Config(format!("invalid timeout: {}", raw)))
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Credential missing, expired, or rejected (HTTP 401/403).
    #[error("unauthorized")]
    Unauthorized,
    /// Backend answered but not with a usable payload (5xx, other non-success, bad body).
    #[error("server error")]
    ServerError,
    /// Transport gave up waiting for a response.
    #[error("request timed out")]
    Timeout,
    /// Backend could not be reached at all.
    #[error("network unreachable")]
    NetworkUnreachable,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Unauthorized => "unauthorized",
            FailureKind::ServerError => "server_error",
            FailureKind::Timeout => "timeout",
            FailureKind::NetworkUnreachable => "network_unreachable",
        }
    }
}

/// A mutating action that failed. Always surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{method} {path} failed: {kind}{}", detail.as_deref().map(|d| format!(" ({})", d)).unwrap_or_default())]
pub struct RequestError {
    pub kind: FailureKind,
    pub method: &'static str,
    pub path: String,
    /// HTTP status when the backend answered
    pub status: Option<u16>,
    /// Backend-supplied error message, if any
    pub detail: Option<String>,
}

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A mutating request failed.
    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    /// Persisted client state could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// A payload did not match the expected schema.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The HTTP client could not be set up.
    #[error("HTTP client error: {0}")]
    Http(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Config(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_display_includes_detail() {
        let err = RequestError {
            kind: FailureKind::ServerError,
            method: "POST",
            path: "/api/admin/announcements".to_string(),
            status: Some(500),
            detail: Some("database locked".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "POST /api/admin/announcements failed: server error (database locked)"
        );
    }

    #[test]
    fn test_request_error_display_without_detail() {
        let err = RequestError {
            kind: FailureKind::Timeout,
            method: "POST",
            path: "/api/grades".to_string(),
            status: None,
            detail: None,
        };
        assert_eq!(err.to_string(), "POST /api/grades failed: request timed out");
    }

    #[test]
    fn test_failure_kind_serializes_snake_case() {
        let json = serde_json::to_string(&FailureKind::NetworkUnreachable).unwrap();
        assert_eq!(json, "\"network_unreachable\"");
        assert_eq!(FailureKind::ServerError.as_str(), "server_error");
    }
}
