use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::{ContestantId, JudgeId};

/// Criterion id to the value awarded for it.
pub type ScoreDetails = BTreeMap<String, Decimal>;

/// One judge's score for one contestant, as stored at `scores/{judge}/{contestant}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScoreRecord {
    pub total: Decimal,
    #[schema(value_type = BTreeMap<String, Decimal>)]
    pub details: ScoreDetails,
    pub timestamp: DateTime<Utc>,
}

impl ScoreRecord {
    /// Builds a record whose total is the sum of its details.
    pub fn from_details(details: ScoreDetails, timestamp: DateTime<Utc>) -> Self {
        Self {
            total: details.values().copied().sum(),
            details,
            timestamp,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.total == self.details.values().copied().sum::<Decimal>()
    }
}

/// Every stored score, keyed by judge then contestant.
///
/// An absent entry means "not yet scored", which is distinct from a zero score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreSnapshot {
    judges: BTreeMap<JudgeId, BTreeMap<ContestantId, ScoreRecord>>,
}

impl ScoreSnapshot {
    /// Parses the `scores` subtree. An absent subtree is an empty snapshot and
    /// unreadable entries are skipped.
    pub fn from_value(value: Option<Value>) -> Self {
        let mut snapshot = Self::default();
        let Some(Value::Object(judges)) = value else {
            return snapshot;
        };

        for (judge, contestants) in judges {
            let Value::Object(contestants) = contestants else {
                tracing::warn!(judge = %judge, "ignoring malformed score subtree");
                continue;
            };
            for (contestant, raw) in contestants {
                match serde_json::from_value::<ScoreRecord>(raw) {
                    Ok(record) => {
                        snapshot.insert(
                            JudgeId::from_storage_key(&judge),
                            ContestantId::new(contestant),
                            record,
                        );
                    }
                    Err(e) => {
                        tracing::warn!(judge = %judge, contestant = %contestant, error = %e, "ignoring malformed score record");
                    }
                }
            }
        }

        snapshot
    }

    pub fn insert(&mut self, judge: JudgeId, contestant: ContestantId, record: ScoreRecord) {
        let record = if record.is_consistent() {
            record
        } else {
            tracing::warn!(judge = %judge, contestant = %contestant, "stored total disagrees with details, using details");
            ScoreRecord::from_details(record.details, record.timestamp)
        };
        self.judges.entry(judge).or_default().insert(contestant, record);
    }

    pub fn get(&self, judge: &JudgeId, contestant: &ContestantId) -> Option<&ScoreRecord> {
        self.judges.get(judge)?.get(contestant)
    }

    pub fn judge(&self, judge: &JudgeId) -> Option<&BTreeMap<ContestantId, ScoreRecord>> {
        self.judges.get(judge)
    }

    pub fn judges(&self) -> impl Iterator<Item = &JudgeId> {
        self.judges.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.judges.is_empty()
    }
}
