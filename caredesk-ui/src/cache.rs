//! Process-wide raw snapshot cache.
//!
//! A single cached value, keyed by nothing: the latest raw fetch of the
//! two form streams. Invalidated only by an explicit user-triggered
//! refresh; the pipeline recomputes deterministically from whatever
//! snapshot is currently cached and has no awareness of caching itself.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::RwLock;

/// The raw record collections of one fetch, as handed to the pipeline.
#[derive(Debug)]
pub struct RawSnapshot {
    pub registrations: Vec<Value>,
    pub followups: Vec<Value>,
    pub fetched_at: DateTime<Utc>,
}

impl RawSnapshot {
    pub fn new(registrations: Vec<Value>, followups: Vec<Value>) -> Self {
        Self {
            registrations,
            followups,
            fetched_at: Utc::now(),
        }
    }
}

/// Holder for the single cached snapshot.
#[derive(Default)]
pub struct SnapshotCache {
    inner: RwLock<Option<Arc<RawSnapshot>>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> Option<Arc<RawSnapshot>> {
        self.inner.read().await.clone()
    }

    pub async fn store(&self, snapshot: Arc<RawSnapshot>) {
        *self.inner.write().await = Some(snapshot);
    }

    /// Drop the cached snapshot; the next dashboard request re-fetches.
    pub async fn invalidate(&self) {
        *self.inner.write().await = None;
    }
}
