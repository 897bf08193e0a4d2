//! SQLite-backed library of saved posts.
//!
//! This module provides the durable store behind the save/query/export
//! workflow, with async access via tokio-rusqlite. It supports:
//!
//! - Upsert-by-id writes that keep insertion order append-like
//! - Automatic schema migrations
//! - WAL mode for concurrent access
//! - Single-row entitlement state alongside the posts

pub mod connection;
pub mod entitlement;
pub mod migrations;
pub mod posts;

pub use crate::Error;

pub use connection::LibraryDb;
