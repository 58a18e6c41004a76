use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use tracing::debug;

use super::SESSIONS;
use crate::error::Result;
use crate::models::JudgeId;
use crate::sync::{StorePath, SyncService};

/// Admitted judge sessions at `sessions/{judge}`.
pub struct SessionRepository<'a> {
    sync: &'a dyn SyncService,
}

impl<'a> SessionRepository<'a> {
    pub fn new(sync: &'a dyn SyncService) -> Self {
        Self { sync }
    }

    fn session_path(judge: &JudgeId) -> Result<StorePath> {
        Ok(StorePath::root().child(SESSIONS)?.child(judge.as_str())?)
    }

    pub async fn admit(&self, judge: &JudgeId) -> Result<DateTime<Utc>> {
        let started_at = Utc::now();
        self.sync
            .set(
                &Self::session_path(judge)?,
                json!({ "started_at": started_at.timestamp_millis() }),
            )
            .await?;

        debug!(judge = %judge, "session recorded");
        Ok(started_at)
    }

    /// When the judge's current session started, if one was recorded.
    pub async fn started_at(&self, judge: &JudgeId) -> Result<Option<DateTime<Utc>>> {
        let subscription = self.sync.subscribe(&Self::session_path(judge)?).await?;
        let value = subscription.current();
        subscription.unsubscribe();

        Ok(value
            .as_ref()
            .and_then(|v| v.get("started_at"))
            .and_then(Value::as_i64)
            .and_then(DateTime::from_timestamp_millis))
    }
}
