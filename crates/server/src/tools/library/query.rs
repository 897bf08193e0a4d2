//! library_query tool implementation.
//!
//! Filters the library with conjunctive predicates and returns the
//! matches newest first, together with facets computed over the whole
//! library so a narrow result still shows every refinement.

use feedclip_core::query::{Facets, QueryFilter, build_facets, filter_posts, parse_saved_after, sort_for_display};
use feedclip_core::record::SavedPost;
use feedclip_core::{Error, LibraryDb};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the library_query tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct LibraryQueryParams {
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

/// Output from the library_query tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LibraryQueryOutput {
    /// Matching posts, newest first.
    pub posts: Vec<SavedPost>,
    /// Number of matches.
    pub total: usize,
    /// Tags and authors across the whole library.
    pub facets: Facets,
}

/// Build a filter from raw tool parameters.
///
/// Blank strings mean "unset"; a non-empty `saved_after` that doesn't
/// parse is an input error rather than a silently-empty result.
pub(crate) fn build_filter(
    text: Option<String>, tag: Option<String>, author: Option<String>, saved_after: Option<String>,
) -> Result<QueryFilter, Error> {
    let saved_after = match saved_after.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => {
            Some(parse_saved_after(raw).ok_or_else(|| Error::InvalidInput(format!("invalid saved_after: {raw}")))?)
        }
        _ => None,
    };

    Ok(QueryFilter {
        text: text.filter(|t| !t.trim().is_empty()),
        tag: tag.filter(|t| !t.is_empty()),
        author: author.filter(|a| !a.is_empty()),
        saved_after,
    })
}

/// Implementation of the library_query tool.
pub async fn query_impl(library: &LibraryDb, params: LibraryQueryParams) -> Result<CallToolResult, McpError> {
    let filter = build_filter(params.text, params.tag, params.author, params.saved_after)?;

    let all = library.load_posts().await?;
    let facets = build_facets(&all);

    let mut posts = filter_posts(&all, &filter);
    sort_for_display(&mut posts);
    let total = posts.len();

    let output = LibraryQueryOutput { posts, total, facets };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize posts: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
