//! Library-related MCP tools.
//!
//! This module provides tools for saving, querying, exporting, and
//! clearing the durable post library.

pub mod clear;
pub mod export;
pub mod query;
pub mod save;

pub use clear::clear_impl;
pub use export::{LibraryExportParams, export_impl};
pub use query::{LibraryQueryParams, query_impl};
pub use save::{LibrarySaveParams, save_impl};
