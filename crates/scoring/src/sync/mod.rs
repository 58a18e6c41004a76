//! Contract with the realtime synchronization service.
//!
//! The scoring core only relies on point writes, subtree deletes, multi-path
//! merge updates and live subtree subscriptions. Any transport offering those
//! four primitives can back a [`crate::Store`].

pub mod memory;
pub mod path;

use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::watch;

pub use memory::MemorySync;
pub use path::StorePath;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("write rejected by store: {0}")]
    Rejected(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("subscription closed")]
    Closed,
}

#[async_trait::async_trait]
pub trait SyncService: Send + Sync {
    /// Replaces the value at `path`. Writing `null` deletes it.
    async fn set(&self, path: &StorePath, value: Value) -> Result<(), SyncError>;

    /// Deletes the value at `path` and everything below it.
    async fn remove(&self, path: &StorePath) -> Result<(), SyncError>;

    /// Merges `fields` into `path`. Keys may be relative multi-segment paths and
    /// `null` values delete; the whole update is applied as one change.
    async fn update(&self, path: &StorePath, fields: Map<String, Value>) -> Result<(), SyncError>;

    /// Opens a live feed of the subtree at `path`.
    async fn subscribe(&self, path: &StorePath) -> Result<Subscription, SyncError>;
}

/// Live view of one subtree. Dropping it, or calling [`Subscription::unsubscribe`],
/// releases the feed.
#[derive(Debug)]
pub struct Subscription {
    path: StorePath,
    rx: watch::Receiver<Option<Value>>,
}

impl Subscription {
    pub fn new(path: StorePath, rx: watch::Receiver<Option<Value>>) -> Self {
        Self { path, rx }
    }

    /// Latest value delivered by the store, `None` while absent or not yet synced.
    pub fn current(&self) -> Option<Value> {
        self.rx.borrow().clone()
    }

    /// Waits for the next delivered change.
    pub async fn changed(&mut self) -> Result<(), SyncError> {
        self.rx.changed().await.map_err(|_| SyncError::Closed)
    }

    /// True when a change arrived that has not been awaited yet.
    pub fn has_pending_change(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    pub fn unsubscribe(self) {
        tracing::trace!(path = %self.path, "subscription released");
    }
}
