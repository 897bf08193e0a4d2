//! Capture session with a re-processing guard.
//!
//! Feed observation fires repeatedly for the same subtree, so every
//! capture is fingerprinted and a repeat becomes a no-op. The guard is
//! keyed on the permalink when one exists, else on actor plus text.

use crate::extract::{FeedProfile, extract_post};
use feedclip_core::record::CapturedPost;
use feedclip_core::text::dedupe_sentences;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use url::Url;

/// One continuous observation of a feed page.
#[derive(Debug, Default)]
pub struct CaptureSession {
    profile: FeedProfile,
    seen: HashSet<String>,
}

impl CaptureSession {
    pub fn new(profile: FeedProfile) -> Self {
        Self { profile, seen: HashSet::new() }
    }

    /// Extract and clean a post, or None when this session already
    /// captured the same post.
    pub fn capture(&mut self, html: &str, base_url: Option<&Url>) -> Option<CapturedPost> {
        let mut record = extract_post(html, base_url, &self.profile);
        record.text = dedupe_sentences(&record.text);

        let fingerprint = record_fingerprint(&record);
        if !self.seen.insert(fingerprint) {
            tracing::debug!(actor = %record.actor, "skipping already-captured post");
            return None;
        }
        Some(record)
    }

    /// Forget every fingerprint, e.g. after the observed page reloads.
    pub fn reset(&mut self) {
        self.seen.clear();
    }
}

/// Stable identity of a captured post within a session.
fn record_fingerprint(record: &CapturedPost) -> String {
    let mut hasher = Sha256::new();
    if record.url.is_empty() {
        hasher.update(record.actor.as_bytes());
        hasher.update(b"\n");
        hasher.update(record.text.as_bytes());
    } else {
        hasher.update(record.url.as_bytes());
    }
    hex::encode(hasher.finalize())
}
