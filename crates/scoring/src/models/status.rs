use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::JudgeId;

/// Advisory activity record at `status/{judge}`. Never used for scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusRecord {
    pub status: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[schema(value_type = i64)]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    records: BTreeMap<JudgeId, StatusRecord>,
}

impl StatusSnapshot {
    pub fn from_value(value: Option<Value>) -> Self {
        let mut snapshot = Self::default();
        let Some(Value::Object(entries)) = value else {
            return snapshot;
        };

        for (judge, raw) in entries {
            match serde_json::from_value::<StatusRecord>(raw) {
                Ok(record) => {
                    snapshot
                        .records
                        .insert(JudgeId::from_storage_key(&judge), record);
                }
                Err(e) => tracing::warn!(judge = %judge, error = %e, "ignoring malformed status"),
            }
        }

        snapshot
    }

    pub fn get(&self, judge: &JudgeId) -> Option<&StatusRecord> {
        self.records.get(judge)
    }

    pub fn insert(&mut self, judge: JudgeId, record: StatusRecord) {
        self.records.insert(judge, record);
    }

    /// Most recent record among `judges`. On equal timestamps the earlier judge wins.
    pub fn freshest<'a>(
        &self,
        judges: impl IntoIterator<Item = &'a JudgeId>,
    ) -> Option<(&JudgeId, &StatusRecord)> {
        judges
            .into_iter()
            .filter_map(|judge| self.records.get_key_value(judge))
            .fold(None, |best, candidate| match best {
                Some((_, current)) if candidate.1.timestamp <= current.timestamp => best,
                _ => Some(candidate),
            })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
