//! post_fetch tool implementation.
//!
//! Retrieves a stashed record by handoff key. An expired key and a key
//! that never existed are indistinguishable on purpose; both mean the
//! capture must be redone.

use feedclip_core::Error;
use feedclip_core::handoff::HandoffCache;
use feedclip_core::record::CapturedPost;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the post_fetch tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PostFetchParams {
    /// Handoff key returned by post_stash.
    pub key: String,
}

/// Output from the post_fetch tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PostFetchOutput {
    /// The stashed record.
    pub record: CapturedPost,
}

/// Implementation of the post_fetch tool.
pub async fn fetch_impl(handoff: &HandoffCache, params: PostFetchParams) -> Result<CallToolResult, McpError> {
    let record = handoff
        .fetch(&params.key)
        .await
        .ok_or_else(|| Error::HandoffMiss(params.key.clone()))?;

    let output = PostFetchOutput { record };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize record: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
