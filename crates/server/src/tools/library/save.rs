//! library_save tool implementation.
//!
//! Annotates a captured record and upserts it into the library. The
//! free-tier ceiling is checked before any write: at the ceiling every
//! save is refused, including an overwrite of an existing id.

use feedclip_core::record::{CapturedPost, SavedPost, split_tags};
use feedclip_core::{AppConfig, Error, LibraryDb};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the library_save tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LibrarySaveParams {
    /// The captured record to save.
    pub record: CapturedPost,

    /// Stable record id; saving again under the same id overwrites.
    /// Omit to have one generated.
    #[serde(default)]
    pub id: Option<String>,

    /// Comma-separated labels; entries are trimmed and empties dropped.
    #[serde(default)]
    pub tags: Option<String>,

    /// Free-form note stored with the post.
    #[serde(default)]
    pub note: Option<String>,
}

/// Output from the library_save tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LibrarySaveOutput {
    /// The record as persisted.
    pub post: SavedPost,
    /// Library size after the save.
    pub total: usize,
    /// Saves left on the free plan; absent on pro.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<usize>,
}

/// Implementation of the library_save tool.
pub async fn save_impl(
    library: &LibraryDb, config: &AppConfig, params: LibrarySaveParams,
) -> Result<CallToolResult, McpError> {
    let entitlement = library.get_entitlement().await?;
    let count = library.count_posts().await?;

    if !entitlement.is_pro() && count >= config.free_tier_limit {
        return Err(Error::CapacityExceeded { count, limit: config.free_tier_limit }.into());
    }

    let post = SavedPost {
        id: params
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        post: params.record,
        tags: params.tags.as_deref().map(split_tags).unwrap_or_default(),
        note: params.note.unwrap_or_default(),
        saved_at: chrono::Utc::now().to_rfc3339(),
    };

    library.upsert_post(&post).await?;
    let total = library.count_posts().await?;

    let remaining = if entitlement.is_pro() { None } else { Some(config.free_tier_limit.saturating_sub(total)) };

    tracing::info!(id = %post.id, total, "saved post to library");

    let output = LibrarySaveOutput { post, total, remaining };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize post: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
