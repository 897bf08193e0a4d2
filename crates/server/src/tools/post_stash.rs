//! post_stash tool implementation.
//!
//! Parks an extracted record in the handoff cache and returns the key
//! a second context uses to fetch it.

use feedclip_core::Error;
use feedclip_core::handoff::HandoffCache;
use feedclip_core::record::CapturedPost;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the post_stash tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PostStashParams {
    /// The record to park for handoff.
    pub record: CapturedPost,
}

/// Output from the post_stash tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PostStashOutput {
    /// Key for retrieving the record before the TTL expires.
    pub key: String,
}

/// Implementation of the post_stash tool.
pub async fn stash_impl(handoff: &HandoffCache, params: PostStashParams) -> Result<CallToolResult, McpError> {
    let key = handoff.stash(params.record).await;

    let output = PostStashOutput { key };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize key: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stash_returns_distinct_keys() {
        let handoff = HandoffCache::default();
        let record = CapturedPost { actor: "Jane".into(), text: "hello".into(), ..Default::default() };

        let first = stash_impl(&handoff, PostStashParams { record: record.clone() }).await.unwrap();
        let second = stash_impl(&handoff, PostStashParams { record }).await.unwrap();

        let key_of = |result: &CallToolResult| {
            let content = serde_json::to_value(&result.content[0]).unwrap();
            let text = content.get("text").and_then(|v| v.as_str()).unwrap().to_string();
            let output: PostStashOutput = serde_json::from_str(&text).unwrap();
            output.key
        };

        assert_ne!(key_of(&first), key_of(&second));
        assert_eq!(handoff.len().await, 2);
    }
}
