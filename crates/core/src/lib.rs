//! Core types and shared functionality for mcp-feedclip.
//!
//! This crate provides:
//! - Post record model and sentence-level deduplication
//! - Handoff cache bridging capture and annotation contexts
//! - Library store with SQLite backend
//! - Filter, facet, and CSV export engine
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod export;
pub mod handoff;
pub mod library;
pub mod query;
pub mod record;
pub mod text;

pub use config::AppConfig;
pub use error::Error;
pub use handoff::HandoffCache;
pub use library::LibraryDb;
pub use record::{CapturedPost, Entitlement, Plan, SavedPost};
