//! Unified error types for mcp-feedclip.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

/// Unified error types for the mcp-feedclip server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty HTML).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// No handoff entry for the given key (expired or never stored).
    #[error("HANDOFF_MISS: {0}")]
    HandoffMiss(String),

    /// Database operation failed.
    #[error("LIBRARY_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("LIBRARY_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// The free plan's library is full.
    #[error("CAPACITY_EXCEEDED: library holds {count} of {limit} free posts; upgrade to the pro plan to save more")]
    CapacityExceeded { count: usize, limit: usize },

    /// License key failed the shape check.
    #[error("MALFORMED_LICENSE: {0}")]
    MalformedLicense(String),

    /// Licensing service rejected the key or session.
    #[error("LICENSE_REJECTED: {0}")]
    LicenseRejected(String),

    /// Licensing service unreachable or failing.
    #[error("SERVICE_UNREACHABLE: {0}")]
    ServiceUnreachable(String),
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::HandoffMiss(msg) => (-32001, msg.clone()),
            Error::Database(e) => (-32002, e.to_string()),
            Error::MigrationFailed(msg) => (-32002, msg.clone()),
            Error::CapacityExceeded { .. } => (-32010, err.to_string()),
            Error::MalformedLicense(msg) => (-32011, msg.clone()),
            Error::LicenseRejected(msg) => (-32012, msg.clone()),
            Error::ServiceUnreachable(msg) => (-32013, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::HandoffMiss("abc123".to_string());
        assert!(err.to_string().contains("HANDOFF_MISS"));
        assert!(err.to_string().contains("abc123"));
    }

    #[test]
    fn test_capacity_message_points_at_upgrade() {
        let err = Error::CapacityExceeded { count: 100, limit: 100 };
        let msg = err.to_string();
        assert!(msg.contains("100 of 100"));
        assert!(msg.contains("upgrade"));
    }

    #[test]
    fn test_error_to_mcp_error() {
        let err = Error::HandoffMiss("abc123".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32001);

        let err = Error::CapacityExceeded { count: 100, limit: 100 };
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32010);
    }
}
