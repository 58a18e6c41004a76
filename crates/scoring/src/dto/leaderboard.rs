use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::{Category, Contestant, ContestantId};
use crate::services::aggregation::RoundingMode;

/// Presentation-time transform applied to a board. Never stored with the scores.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
pub struct LeaderboardQuery {
    #[serde(default)]
    #[param(value_type = Option<f64>)]
    pub curve: Decimal,
    #[serde(default)]
    pub rounding: RoundingMode,
}

impl LeaderboardQuery {
    pub fn validate(&self) -> Result<(), String> {
        let limit = Decimal::from(1000);
        if self.curve.abs() > limit {
            return Err(format!("curve must be between -{} and {}", limit, limit));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContestantSummary {
    pub id: ContestantId,
    pub name: String,
    pub section: Option<String>,
    pub team: Option<String>,
    pub link: Option<String>,
}

impl From<&Contestant> for ContestantSummary {
    fn from(contestant: &Contestant) -> Self {
        Self {
            id: contestant.id.clone(),
            name: contestant.display_name(),
            section: contestant.section.clone(),
            team: contestant.team.clone(),
            link: contestant.link.clone(),
        }
    }
}

/// One judge column of a row. `total` is `None` when the judge has not scored yet.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JudgeCell {
    pub judge: String,
    pub total: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub contestant: ContestantSummary,
    pub scores: Vec<JudgeCell>,
    pub raw_total: Decimal,
    pub final_score: Decimal,
    pub is_complete: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Leaderboard {
    pub board_id: String,
    pub title: String,
    pub category: Category,
    /// Display names of the judge columns, in order.
    pub judges: Vec<String>,
    pub max_score: Decimal,
    pub curve: Decimal,
    pub rounding: RoundingMode,
    pub entries: Vec<LeaderboardEntry>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BoardSummary {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub judges: Vec<String>,
    pub max_score: Decimal,
    pub contestants: usize,
}
