//! license_status tool implementation.

use feedclip_core::record::Plan;
use feedclip_core::{AppConfig, Error, LibraryDb};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output from the license_status tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LicenseStatusOutput {
    /// Current plan.
    pub plan: Plan,
    /// Number of posts in the library.
    pub saved_count: usize,
    /// Free-tier ceiling. Absent on pro.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    /// Saves left before the ceiling. Absent on pro.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<usize>,
    /// Stored license key, if a key-based activation happened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_key: Option<String>,
    /// When the current plan was activated, RFC 3339.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activated_at: Option<String>,
}

/// Implementation of the license_status tool.
pub async fn status_impl(library: &LibraryDb, config: &AppConfig) -> Result<CallToolResult, McpError> {
    let entitlement = library.get_entitlement().await?;
    let saved_count = library.count_posts().await?;

    let (limit, remaining) = if entitlement.is_pro() {
        (None, None)
    } else {
        (Some(config.free_tier_limit), Some(config.free_tier_limit.saturating_sub(saved_count)))
    };

    let output = LicenseStatusOutput {
        plan: entitlement.plan,
        saved_count,
        limit,
        remaining,
        license_key: entitlement.license_key,
        activated_at: entitlement.activated_at,
    };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize result: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedclip_core::record::Entitlement;

    fn output_of(result: &CallToolResult) -> LicenseStatusOutput {
        let content = serde_json::to_value(&result.content[0]).unwrap();
        let text = content.get("text").and_then(|v| v.as_str()).unwrap();
        serde_json::from_str(text).unwrap()
    }

    #[tokio::test]
    async fn test_status_reports_free_tier_headroom() {
        let library = LibraryDb::open_in_memory().await.unwrap();
        let config = AppConfig::default();

        let result = status_impl(&library, &config).await.unwrap();
        let output = output_of(&result);

        assert_eq!(output.plan, Plan::Free);
        assert_eq!(output.saved_count, 0);
        assert_eq!(output.limit, Some(config.free_tier_limit));
        assert_eq!(output.remaining, Some(config.free_tier_limit));
    }

    #[tokio::test]
    async fn test_status_hides_limit_on_pro() {
        let library = LibraryDb::open_in_memory().await.unwrap();
        let config = AppConfig::default();

        let entitlement = Entitlement { plan: Plan::Pro, ..Default::default() };
        library.set_entitlement(&entitlement).await.unwrap();

        let result = status_impl(&library, &config).await.unwrap();
        let output = output_of(&result);

        assert_eq!(output.plan, Plan::Pro);
        assert!(output.limit.is_none());
        assert!(output.remaining.is_none());
    }
}
