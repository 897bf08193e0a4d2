//! checkout_start and checkout_confirm tool implementations.
//!
//! Starting a checkout records the session id so a later confirm can
//! run without arguments. Confirmation distinguishes a backend "no"
//! from an unreachable backend: the backend's verdict is always final,
//! while a transport failure can optionally grant pro anyway on the
//! assumption the payment completed (`grant_on_confirm_failure`).

use chrono::Utc;
use feedclip_client::LicenseClient;
use feedclip_core::record::Plan;
use feedclip_core::{AppConfig, Error, LibraryDb};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the checkout_start tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CheckoutStartParams {
    /// Installation identifier passed through to the payment backend.
    pub install_id: String,
}

/// Output from the checkout_start tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CheckoutStartOutput {
    /// Session id to confirm later.
    pub session_id: String,
    /// Hosted payment page to open in a browser.
    pub url: String,
}

/// Parameters for the checkout_confirm tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CheckoutConfirmParams {
    /// Session to confirm. Defaults to the one recorded by checkout_start.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Output from the checkout_confirm tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CheckoutConfirmOutput {
    /// Plan after confirmation.
    pub plan: Plan,
    /// Purchaser email, when the backend reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// License key issued for the purchase, when the backend reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_key: Option<String>,
    /// True when pro was granted without backend confirmation.
    pub assumed: bool,
}

/// Implementation of the checkout_start tool.
pub async fn start_impl(
    library: &LibraryDb, license: &LicenseClient, params: CheckoutStartParams,
) -> Result<CallToolResult, McpError> {
    if params.install_id.is_empty() {
        return Err(Error::InvalidInput("install_id cannot be empty".into()).into());
    }

    let session = license.create_checkout(&params.install_id).await.map_err(Error::from)?;

    let mut entitlement = library.get_entitlement().await?;
    entitlement.pending_session_id = Some(session.session_id.clone());
    library.set_entitlement(&entitlement).await?;

    tracing::info!(session_id = %session.session_id, "started checkout session");

    let output = CheckoutStartOutput { session_id: session.session_id, url: session.url };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize result: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Implementation of the checkout_confirm tool.
pub async fn confirm_impl(
    library: &LibraryDb, license: &LicenseClient, config: &AppConfig, params: CheckoutConfirmParams,
) -> Result<CallToolResult, McpError> {
    let mut entitlement = library.get_entitlement().await?;

    let session_id = params
        .session_id
        .filter(|s| !s.is_empty())
        .or_else(|| entitlement.pending_session_id.clone())
        .ok_or_else(|| Error::InvalidInput("no checkout session to confirm".into()))?;

    let output = match license.confirm_session(&session_id).await {
        Ok(details) if details.success => {
            entitlement.plan = Plan::Pro;
            entitlement.license_key = details.license_key;
            entitlement.email = details.email;
            entitlement.activated_at = Some(Utc::now().to_rfc3339());
            entitlement.pending_session_id = None;
            library.set_entitlement(&entitlement).await?;

            tracing::info!(session_id = %session_id, "checkout confirmed, pro plan active");
            CheckoutConfirmOutput {
                plan: Plan::Pro,
                email: entitlement.email.clone(),
                license_key: entitlement.license_key.clone(),
                assumed: false,
            }
        }
        Ok(_) => {
            return Err(Error::LicenseRejected(format!("checkout session {session_id} did not complete")).into());
        }
        Err(err) if err.is_transport() && config.grant_on_confirm_failure => {
            tracing::warn!(
                session_id = %session_id,
                error = %err,
                "could not confirm checkout; granting pro plan on the assumption the payment completed"
            );
            entitlement.plan = Plan::Pro;
            entitlement.activated_at = Some(Utc::now().to_rfc3339());
            entitlement.pending_session_id = None;
            library.set_entitlement(&entitlement).await?;

            CheckoutConfirmOutput { plan: Plan::Pro, email: None, license_key: None, assumed: true }
        }
        Err(err) => return Err(Error::from(err).into()),
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize result: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
