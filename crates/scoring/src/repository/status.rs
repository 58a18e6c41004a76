use chrono::Utc;
use serde_json::{Map, Value};
use tracing::debug;

use super::{Feed, STATUS, StatusFeed};
use crate::error::Result;
use crate::models::{JudgeId, StatusRecord, StatusSnapshot};
use crate::sync::{StorePath, SyncService};

/// Presence records at `status/{judge}`.
pub struct StatusRepository<'a> {
    sync: &'a dyn SyncService,
}

impl<'a> StatusRepository<'a> {
    pub fn new(sync: &'a dyn SyncService) -> Self {
        Self { sync }
    }

    fn root() -> Result<StorePath> {
        Ok(StorePath::root().child(STATUS)?)
    }

    /// Merges a fresh `{status, timestamp}` into this judge's entry only.
    pub async fn set_status(&self, judge: &JudgeId, text: &str) -> Result<StatusRecord> {
        let record = StatusRecord {
            status: text.to_string(),
            timestamp: Utc::now(),
        };

        let mut fields = Map::new();
        fields.insert("status".to_string(), Value::from(record.status.clone()));
        fields.insert(
            "timestamp".to_string(),
            Value::from(record.timestamp.timestamp_millis()),
        );
        self.sync
            .update(&Self::root()?.child(judge.as_str())?, fields)
            .await?;

        debug!(judge = %judge, status = %record.status, "status updated");
        Ok(record)
    }

    pub async fn snapshot(&self) -> Result<StatusSnapshot> {
        Ok(self.subscribe_all().await?.current())
    }

    pub async fn subscribe_all(&self) -> Result<StatusFeed> {
        let subscription = self.sync.subscribe(&Self::root()?).await?;
        Ok(Feed::new(subscription))
    }

    pub async fn clear(&self, judges: &[JudgeId]) -> Result<()> {
        for judge in judges {
            self.sync
                .remove(&Self::root()?.child(judge.as_str())?)
                .await?;
        }
        Ok(())
    }
}
