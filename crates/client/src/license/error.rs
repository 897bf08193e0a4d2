//! License client error types.

use std::sync::Arc;

/// Errors from the licensing backend client.
#[derive(Debug, thiserror::Error)]
pub enum LicenseError {
    /// Key failed the shape check; no request was made.
    #[error("malformed license key: {0}")]
    MalformedKey(String),

    /// Backend explicitly rejected the key or session.
    #[error("license rejected: {0}")]
    Rejected(String),

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl LicenseError {
    /// Whether the failure happened in transit rather than as an
    /// explicit backend decision. Drives the checkout grant policy:
    /// only failures the backend never adjudicated qualify.
    pub fn is_transport(&self) -> bool {
        match self {
            LicenseError::Timeout | LicenseError::Network(_) | LicenseError::Parse(_) => true,
            LicenseError::HttpError { status } => *status >= 500,
            LicenseError::MalformedKey(_) | LicenseError::Rejected(_) => false,
        }
    }
}

impl From<reqwest::Error> for LicenseError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { LicenseError::Timeout } else { LicenseError::Network(Arc::new(err)) }
    }
}

impl From<LicenseError> for feedclip_core::Error {
    fn from(err: LicenseError) -> Self {
        match &err {
            LicenseError::MalformedKey(msg) => feedclip_core::Error::MalformedLicense(msg.clone()),
            LicenseError::Rejected(msg) => feedclip_core::Error::LicenseRejected(msg.clone()),
            _ => feedclip_core::Error::ServiceUnreachable(err.to_string()),
        }
    }
}
