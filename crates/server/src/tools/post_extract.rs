//! post_extract tool implementation.
//!
//! Turns one post's HTML subtree into a structured record. No network
//! I/O is performed - HTML is provided by the client.

use feedclip_client::extract::{FeedProfile, extract_post};
use feedclip_core::Error;
use feedclip_core::record::CapturedPost;
use feedclip_core::text::dedupe_sentences;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::Url;

/// Parameters for the post_extract tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PostExtractParams {
    /// The post's HTML subtree to extract from.
    pub html: String,

    /// Page origin for resolving relative permalinks (optional).
    /// If not provided, relative hrefs are preserved as-is.
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Output from the post_extract tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PostExtractOutput {
    /// The extracted record.
    pub record: CapturedPost,
}

/// Implementation of the post_extract tool.
pub async fn extract_impl(params: PostExtractParams) -> Result<CallToolResult, McpError> {
    if params.html.is_empty() {
        return Err(Error::InvalidInput("html cannot be empty".into()).into());
    }

    let base_url = match params.base_url.as_deref() {
        Some(raw) => Some(Url::parse(raw).map_err(|e| Error::InvalidInput(format!("invalid base_url: {e}")))?),
        None => None,
    };

    let mut record = extract_post(&params.html, base_url.as_ref(), &FeedProfile::default());
    record.text = dedupe_sentences(&record.text);

    let output = PostExtractOutput { record };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize record: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
