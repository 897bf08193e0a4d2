//! library_clear tool implementation.

use feedclip_core::{Error, LibraryDb};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output from the library_clear tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LibraryClearOutput {
    /// Number of posts removed.
    pub deleted: u64,
}

/// Implementation of the library_clear tool. Removes every saved post;
/// the entitlement record is untouched.
pub async fn clear_impl(library: &LibraryDb) -> Result<CallToolResult, McpError> {
    let deleted = library.clear_posts().await?;
    tracing::info!(deleted, "cleared library");

    let output = LibraryClearOutput { deleted };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize result: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::library::save::{LibrarySaveParams, save_impl};
    use feedclip_core::AppConfig;
    use feedclip_core::record::CapturedPost;

    fn deleted_count(result: &CallToolResult) -> u64 {
        let content = serde_json::to_value(&result.content[0]).unwrap();
        let text = content.get("text").and_then(|v| v.as_str()).unwrap();
        let output: LibraryClearOutput = serde_json::from_str(text).unwrap();
        output.deleted
    }

    #[tokio::test]
    async fn test_clear_removes_all_posts() {
        let library = LibraryDb::open_in_memory().await.unwrap();
        let config = AppConfig::default();
        for id in ["p1", "p2"] {
            let params = LibrarySaveParams {
                record: CapturedPost { actor: "Jane".into(), text: "hello".into(), ..Default::default() },
                id: Some(id.into()),
                tags: None,
                note: None,
            };
            save_impl(&library, &config, params).await.unwrap();
        }

        let result = clear_impl(&library).await.unwrap();
        assert_eq!(deleted_count(&result), 2);
        assert_eq!(library.count_posts().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clear_on_empty_library_reports_zero() {
        let library = LibraryDb::open_in_memory().await.unwrap();
        let result = clear_impl(&library).await.unwrap();
        assert_eq!(deleted_count(&result), 0);
    }
}
