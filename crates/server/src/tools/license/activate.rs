//! license_activate tool implementation.

use chrono::Utc;
use feedclip_client::{LicenseClient, normalize_input};
use feedclip_core::record::Plan;
use feedclip_core::{Error, LibraryDb};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the license_activate tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LicenseActivateParams {
    /// License key to verify. Normalized before validation, so pasted
    /// keys with stray whitespace or lowercase letters are accepted.
    pub license_key: String,
}

/// Output from the license_activate tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LicenseActivateOutput {
    /// Plan after activation.
    pub plan: Plan,
    /// The normalized key that was stored.
    pub license_key: String,
    /// When the plan was activated, RFC 3339.
    pub activated_at: String,
}

/// Implementation of the license_activate tool. The plan only changes
/// after the backend accepts the key; any verification failure leaves
/// the stored entitlement as it was.
pub async fn activate_impl(
    library: &LibraryDb, license: &LicenseClient, params: LicenseActivateParams,
) -> Result<CallToolResult, McpError> {
    let key = normalize_input(&params.license_key);
    let verdict = license.verify(&key).await.map_err(Error::from)?;

    if !verdict.valid {
        let reason = verdict.reason.unwrap_or_else(|| "invalid license key".into());
        return Err(Error::LicenseRejected(reason).into());
    }

    let activated_at = Utc::now().to_rfc3339();
    let mut entitlement = library.get_entitlement().await?;
    entitlement.plan = Plan::Pro;
    entitlement.license_key = Some(key.clone());
    entitlement.activated_at = Some(activated_at.clone());
    library.set_entitlement(&entitlement).await?;

    tracing::info!("activated pro plan");

    let output = LicenseActivateOutput { plan: Plan::Pro, license_key: key, activated_at };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize result: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
