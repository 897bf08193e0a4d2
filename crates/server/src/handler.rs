//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use crate::tools::library::{
    LibraryExportParams, LibraryQueryParams, LibrarySaveParams, clear_impl, export_impl, query_impl, save_impl,
};
use crate::tools::license::{
    CheckoutConfirmParams, CheckoutStartParams, LicenseActivateParams, activate_impl, confirm_impl, start_impl,
    status_impl,
};
use crate::tools::post_extract::{PostExtractParams, extract_impl};
use crate::tools::post_fetch::{PostFetchParams, fetch_impl};
use crate::tools::post_stash::{PostStashParams, stash_impl};

use feedclip_client::{LicenseClient, LicenseConfig};
use feedclip_core::{AppConfig, Error, HandoffCache, LibraryDb};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for mcp-feedclip.
#[derive(Clone)]
pub struct FeedclipServer {
    library: LibraryDb,
    handoff: HandoffCache,
    license: LicenseClient,
    config: AppConfig,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl FeedclipServer {
    /// Create a new server handler, opening the library at the configured path.
    pub async fn new(config: AppConfig) -> Result<Self, Error> {
        let library = LibraryDb::open(&config.db_path).await?;
        Self::with_library(library, config)
    }

    /// Create a server handler around an already-open library.
    pub fn with_library(library: LibraryDb, config: AppConfig) -> Result<Self, Error> {
        let license = LicenseClient::new(LicenseConfig {
            base_url: config.license_base_url.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        })
        .map_err(Error::from)?;
        let handoff = HandoffCache::new(config.handoff_ttl());

        Ok(Self { library, handoff, license, config, tool_router: Self::tool_router() })
    }

    #[tool(
        description = "Extract a structured post record from feed HTML. Returns actor, text, images, timestamp, and permalink. No network requests are made."
    )]
    async fn post_extract(&self, params: Parameters<PostExtractParams>) -> Result<CallToolResult, McpError> {
        extract_impl(params.0).await
    }

    #[tool(
        description = "Stash a captured post for a short-lived handoff. Returns a key that post_fetch accepts until the entry expires."
    )]
    async fn post_stash(&self, params: Parameters<PostStashParams>) -> Result<CallToolResult, McpError> {
        stash_impl(&self.handoff, params.0).await
    }

    #[tool(description = "Fetch a previously stashed post by key. Fails if the key is unknown or the entry has expired.")]
    async fn post_fetch(&self, params: Parameters<PostFetchParams>) -> Result<CallToolResult, McpError> {
        fetch_impl(&self.handoff, params.0).await
    }

    #[tool(
        description = "Save a post to the library. Saving with an existing id overwrites that record; the free plan refuses new saves once the library is full."
    )]
    async fn library_save(&self, params: Parameters<LibrarySaveParams>) -> Result<CallToolResult, McpError> {
        save_impl(&self.library, &self.config, params.0).await
    }

    #[tool(
        description = "Query saved posts with filters (text, tag, author, saved_after). All given filters must match. Returns matches newest first plus tag and author facets over the whole library."
    )]
    async fn library_query(&self, params: Parameters<LibraryQueryParams>) -> Result<CallToolResult, McpError> {
        query_impl(&self.library, params.0).await
    }

    #[tool(
        description = "Export the library as CSV, honoring the same filters as library_query. The document opens cleanly in spreadsheet apps."
    )]
    async fn library_export(&self, params: Parameters<LibraryExportParams>) -> Result<CallToolResult, McpError> {
        export_impl(&self.library, params.0).await
    }

    #[tool(description = "Delete every saved post. The plan and any stored license are untouched.")]
    async fn library_clear(&self) -> Result<CallToolResult, McpError> {
        clear_impl(&self.library).await
    }

    #[tool(description = "Verify a license key with the licensing backend and activate the pro plan.")]
    async fn license_activate(&self, params: Parameters<LicenseActivateParams>) -> Result<CallToolResult, McpError> {
        activate_impl(&self.library, &self.license, params.0).await
    }

    #[tool(description = "Report the current plan, saved-post count, and remaining free-tier capacity.")]
    async fn license_status(&self) -> Result<CallToolResult, McpError> {
        status_impl(&self.library, &self.config).await
    }

    #[tool(
        description = "Create a checkout session for the pro plan and return the payment page URL. The session id is remembered for checkout_confirm."
    )]
    async fn checkout_start(&self, params: Parameters<CheckoutStartParams>) -> Result<CallToolResult, McpError> {
        start_impl(&self.library, &self.license, params.0).await
    }

    #[tool(
        description = "Confirm a completed checkout and activate the pro plan. Uses the session recorded by checkout_start when no session id is given."
    )]
    async fn checkout_confirm(&self, params: Parameters<CheckoutConfirmParams>) -> Result<CallToolResult, McpError> {
        confirm_impl(&self.library, &self.license, &self.config, params.0).await
    }
}

impl ServerHandler for FeedclipServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "mcp-feedclip".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
