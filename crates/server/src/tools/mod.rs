//! MCP tool implementations.
//!
//! Each tool lives in its own module as a plain async function taking
//! its dependencies explicitly, so the logic is testable without a
//! running MCP transport. The handler wires them to the router.

pub mod library;
pub mod license;
pub mod post_extract;
pub mod post_fetch;
pub mod post_stash;
