//! library_export tool implementation.
//!
//! Renders the current library view as CSV using the same filters as
//! library_query, so an export always matches what a query shows.

use feedclip_core::LibraryDb;
use feedclip_core::export::export_csv;
use feedclip_core::query::{filter_posts, sort_for_display};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the library_export tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct LibraryExportParams {
    /// Case-insensitive substring matched against actor, text, tags, and note.
    #[serde(default)]
    pub text: Option<String>,

    /// Exact tag the post must carry.
    #[serde(default)]
    pub tag: Option<String>,

    /// Exact author name.
    #[serde(default)]
    pub author: Option<String>,

    /// Only posts saved at or after this time (RFC 3339 or YYYY-MM-DD).
    #[serde(default)]
    pub saved_after: Option<String>,
}

/// Implementation of the library_export tool. Returns the CSV document
/// itself rather than a JSON wrapper.
pub async fn export_impl(library: &LibraryDb, params: LibraryExportParams) -> Result<CallToolResult, McpError> {
    let filter = super::query::build_filter(params.text, params.tag, params.author, params.saved_after)?;

    let all = library.load_posts().await?;
    let mut posts = filter_posts(&all, &filter);
    sort_for_display(&mut posts);

    let csv = export_csv(&posts);
    tracing::info!(rows = posts.len(), "exported library view");

    Ok(CallToolResult::success(vec![Content::text(csv)]))
}
