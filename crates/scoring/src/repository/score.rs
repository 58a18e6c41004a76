use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::{Feed, SCORES, ScoreFeed};
use crate::error::{Result, ScoreRejection};
use crate::models::{ContestantId, JudgeId, Rubric, ScoreDetails, ScoreRecord, ScoreSnapshot};
use crate::sync::{StorePath, SyncService};

/// Score records at `scores/{judge}/{contestant}`.
pub struct ScoreRepository<'a> {
    sync: &'a dyn SyncService,
}

impl<'a> ScoreRepository<'a> {
    pub fn new(sync: &'a dyn SyncService) -> Self {
        Self { sync }
    }

    fn root() -> Result<StorePath> {
        Ok(StorePath::root().child(SCORES)?)
    }

    fn record_path(judge: &JudgeId, contestant: &ContestantId) -> Result<StorePath> {
        Ok(Self::root()?.child(judge.as_str())?.child(contestant.as_str())?)
    }

    /// Validates `details` against `rubric`, then overwrites the stored record.
    ///
    /// The total is recomputed here. A rejected write leaves any previous record untouched.
    pub async fn write(
        &self,
        judge: &JudgeId,
        contestant: &ContestantId,
        rubric: &Rubric,
        details: ScoreDetails,
    ) -> Result<ScoreRecord> {
        if let Err(rejection) = validate_details(rubric, &details) {
            warn!(judge = %judge, contestant = %contestant, %rejection, "score rejected");
            return Err(rejection.into());
        }

        let record = ScoreRecord::from_details(details, Utc::now());
        let path = Self::record_path(judge, contestant)?;
        self.sync.set(&path, serde_json::to_value(&record)?).await?;

        debug!(judge = %judge, contestant = %contestant, total = %record.total, "score saved");
        Ok(record)
    }

    pub async fn read(
        &self,
        judge: &JudgeId,
        contestant: &ContestantId,
    ) -> Result<Option<ScoreRecord>> {
        let subscription = self
            .sync
            .subscribe(&Self::record_path(judge, contestant)?)
            .await?;
        let value = subscription.current();
        subscription.unsubscribe();

        match value {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    pub async fn snapshot(&self) -> Result<ScoreSnapshot> {
        Ok(self.subscribe_all().await?.current())
    }

    pub async fn subscribe_all(&self) -> Result<ScoreFeed> {
        let subscription = self.sync.subscribe(&Self::root()?).await?;
        Ok(Feed::new(subscription))
    }

    /// Removes every record of the given judges in a single store update.
    pub async fn delete_scope(&self, judges: &[JudgeId]) -> Result<()> {
        if judges.is_empty() {
            return Ok(());
        }

        let mut fields = Map::new();
        for judge in judges {
            StorePath::root().child(judge.as_str())?;
            fields.insert(judge.as_str().to_string(), Value::Null);
        }
        self.sync.update(&Self::root()?, fields).await?;

        info!(judges = ?judges, "deleted score scope");
        Ok(())
    }
}

/// Every rubric criterion must be present with `0 <= value <= max`, and nothing else.
pub fn validate_details(rubric: &Rubric, details: &ScoreDetails) -> std::result::Result<(), ScoreRejection> {
    if let Some(unknown) = details.keys().find(|id| rubric.criterion(id).is_none()) {
        return Err(ScoreRejection::UnknownCriterion(unknown.clone()));
    }

    for criterion in &rubric.criteria {
        let value = details
            .get(&criterion.id)
            .copied()
            .ok_or_else(|| ScoreRejection::MissingCriterion(criterion.id.clone()))?;

        if value < Decimal::ZERO || value > criterion.max {
            return Err(ScoreRejection::OutOfRange {
                criterion: criterion.id.clone(),
                value,
                max: criterion.max,
            });
        }
    }

    Ok(())
}
