//! Post record model.
//!
//! `CapturedPost` is the extractor's output. `SavedPost` adds identity
//! and the user's annotations once a record enters the library.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A structured post captured from a feed's HTML subtree.
///
/// Every field is best-effort: extraction degrades to defaults rather
/// than failing, so a record is always well-formed even when sparse.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CapturedPost {
    /// Display name of the post author.
    pub actor: String,

    /// Main post text, whitespace-normalized.
    pub text: String,

    /// Content image URLs in document order, capped at four.
    #[serde(default)]
    pub images: Vec<String>,

    /// Original post time as published by the feed, best effort.
    #[serde(default)]
    pub timestamp: String,

    /// Canonical permalink, or empty when none could be derived.
    #[serde(default)]
    pub url: String,

    /// RFC 3339 capture time, stamped once at extraction.
    #[serde(default)]
    pub captured_at: String,
}

/// A post persisted in the library with user annotations.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SavedPost {
    /// Stable record identity; saving again under the same id overwrites.
    pub id: String,

    #[serde(flatten)]
    pub post: CapturedPost,

    /// User labels, trimmed, empties dropped.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Free-form user note.
    #[serde(default)]
    pub note: String,

    /// RFC 3339 time the record entered the library.
    #[serde(default)]
    pub saved_at: String,
}

impl SavedPost {
    /// Best display timestamp: save time, falling back to capture time.
    ///
    /// Returns None when neither parses; ordering code substitutes the
    /// zero epoch so such records sink to the end.
    pub fn display_timestamp(&self) -> Option<DateTime<Utc>> {
        parse_rfc3339(&self.saved_at).or_else(|| parse_rfc3339(&self.post.captured_at))
    }
}

fn parse_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.with_timezone(&Utc))
}

/// Split a comma-separated tag string into clean labels.
pub fn split_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Subscription plan gating the library capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Pro,
}

impl Plan {
    /// Database string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Pro => "pro",
        }
    }

    /// Parse the database string form; unknown values fall back to free.
    pub fn parse(value: &str) -> Self {
        match value {
            "pro" => Plan::Pro,
            _ => Plan::Free,
        }
    }
}

/// Durable plan state for this installation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Entitlement {
    pub plan: Plan,

    /// Key the pro plan was activated with, when one is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// RFC 3339 time the pro plan was enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activated_at: Option<String>,

    /// Checkout session opened by checkout_start and not yet confirmed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_session_id: Option<String>,
}

impl Default for Entitlement {
    fn default() -> Self {
        Self { plan: Plan::Free, license_key: None, email: None, activated_at: None, pending_session_id: None }
    }
}

impl Entitlement {
    pub fn is_pro(&self) -> bool {
        self.plan == Plan::Pro
    }
}
