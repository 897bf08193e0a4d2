//! Handoff cache bridging capture and annotation contexts.
//!
//! A captured record is parked under a generated key for a short TTL
//! while another context picks it up. Expiry is enforced lazily at
//! access time; there is no background sweeper. An expired key is
//! indistinguishable from one that never existed.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::record::CapturedPost;

/// Default time a stashed record stays retrievable.
pub const DEFAULT_HANDOFF_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct StashedPost {
    record: CapturedPost,
    stashed_at: Instant,
}

/// Cloneable handle to the shared handoff store.
#[derive(Debug, Clone)]
pub struct HandoffCache {
    ttl: Duration,
    entries: Arc<Mutex<HashMap<String, StashedPost>>>,
}

impl Default for HandoffCache {
    fn default() -> Self {
        Self::new(DEFAULT_HANDOFF_TTL)
    }
}

impl HandoffCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entries: Arc::new(Mutex::new(HashMap::new())) }
    }

    /// Park a record and return its retrieval key.
    ///
    /// Expired entries are pruned under the same lock acquisition, so
    /// the sweep and the insert are atomic with respect to concurrent
    /// callers.
    pub async fn stash(&self, record: CapturedPost) -> String {
        let key = uuid::Uuid::new_v4().to_string();
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        entries.retain(|_, entry| now.duration_since(entry.stashed_at) <= self.ttl);
        entries.insert(key.clone(), StashedPost { record, stashed_at: now });
        tracing::debug!(key = %key, held = entries.len(), "stashed post for handoff");
        key
    }

    /// Retrieve a stashed record.
    ///
    /// Returns None when the key is unknown or its entry has expired.
    pub async fn fetch(&self, key: &str) -> Option<CapturedPost> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        entries.retain(|_, entry| now.duration_since(entry.stashed_at) <= self.ttl);
        entries.get(key).map(|entry| entry.record.clone())
    }

    /// Number of live entries after a sweep.
    pub async fn len(&self) -> usize {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        entries.retain(|_, entry| now.duration_since(entry.stashed_at) <= self.ttl);
        entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
