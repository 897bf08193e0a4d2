//! Licensing backend client.
//!
//! The backend is a black box with three endpoints: verify a key, open
//! a checkout session, and read a session back after the payment
//! redirect. Keys are only shape-checked on this side; whether a
//! well-formed key is genuine is the backend's decision.

pub mod error;
pub mod key;

pub use error::LicenseError;
pub use key::{KEY_PREFIX, is_well_formed, normalize_input};

use reqwest::header;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Default base URL for the licensing backend.
const DEFAULT_BASE_URL: &str = "https://api.feedclip.app";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "feedclip/0.1";

/// License client configuration.
#[derive(Debug, Clone)]
pub struct LicenseConfig {
    /// Base URL (default: https://api.feedclip.app).
    pub base_url: String,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// User-agent string (default: feedclip/0.x).
    pub user_agent: String,
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    #[serde(rename = "licenseKey")]
    license_key: &'a str,
}

/// Backend verdict on a license key.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
struct CheckoutRequest<'a> {
    #[serde(rename = "extensionId")]
    extension_id: &'a str,
}

/// A freshly opened checkout session.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    /// Hosted payment page the user completes the purchase on.
    pub url: String,
}

/// A checkout session read back after the payment redirect.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionDetails {
    pub success: bool,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "licenseKey", default)]
    pub license_key: Option<String>,
    #[serde(rename = "sessionId", default)]
    pub session_id: Option<String>,
}

/// Licensing backend client.
#[derive(Debug, Clone)]
pub struct LicenseClient {
    http: reqwest::Client,
    config: LicenseConfig,
}

impl LicenseClient {
    /// Create a new license client with the given configuration.
    pub fn new(config: LicenseConfig) -> Result<Self, LicenseError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LicenseError::Network(Arc::new(e)))?;

        Ok(Self { http, config })
    }

    /// Ask the backend whether a key is valid.
    ///
    /// A key failing the shape check is rejected locally without a
    /// network call.
    pub async fn verify(&self, key: &str) -> Result<VerifyResponse, LicenseError> {
        if !key::is_well_formed(key) {
            return Err(LicenseError::MalformedKey(format!("expected {KEY_PREFIX}-XXXX-XXXX-XXXX-XXXX")));
        }

        tracing::debug!("verifying license key against {}", self.config.base_url);

        let response = self
            .http
            .post(format!("{}/verify-license", self.config.base_url))
            .header(header::USER_AGENT, &self.config.user_agent)
            .json(&VerifyRequest { license_key: key })
            .send()
            .await?;

        read_json(response).await
    }

    /// Open a checkout session for this installation.
    pub async fn create_checkout(&self, install_id: &str) -> Result<CheckoutSession, LicenseError> {
        tracing::debug!("creating checkout session against {}", self.config.base_url);

        let response = self
            .http
            .post(format!("{}/create-checkout-session", self.config.base_url))
            .header(header::USER_AGENT, &self.config.user_agent)
            .json(&CheckoutRequest { extension_id: install_id })
            .send()
            .await?;

        read_json(response).await
    }

    /// Read a checkout session back after the payment redirect.
    pub async fn confirm_session(&self, session_id: &str) -> Result<SessionDetails, LicenseError> {
        tracing::debug!(session_id, "confirming checkout session");

        let response = self
            .http
            .get(format!("{}/get-session", self.config.base_url))
            .header(header::USER_AGENT, &self.config.user_agent)
            .query(&[("session_id", session_id)])
            .send()
            .await?;

        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, LicenseError> {
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(LicenseError::HttpError { status: status.as_u16() });
    }

    let bytes = response.bytes().await.map_err(|e| LicenseError::Network(Arc::new(e)))?;
    serde_json::from_slice(&bytes).map_err(|e| LicenseError::Parse(e.to_string()))
}
