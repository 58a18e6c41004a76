use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::leaderboard::ContestantSummary;
use crate::models::{Category, Contestant, ContestantId, JudgeId, JudgeKey, Rubric, ScoreDetails, ScoreRecord};

/// Identity supplied by the authentication boundary.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 100, message = "Judge name must be between 1 and 100 characters"))]
    pub judge: String,
    pub category: Category,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionResponse {
    pub judge: JudgeKey,
    pub judge_id: JudgeId,
    pub category_title: String,
    pub rubric: Rubric,
    pub max_score: Decimal,
    pub assigned: usize,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitScoreRequest {
    #[validate(custom(function = "validate_not_empty"))]
    #[schema(value_type = std::collections::BTreeMap<String, f64>)]
    pub details: ScoreDetails,
}

fn validate_not_empty(details: &ScoreDetails) -> Result<(), ValidationError> {
    if details.is_empty() {
        let mut error = ValidationError::new("empty_details");
        error.message = Some("At least one criterion value is required".into());
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct JudgeProgress {
    pub scored: usize,
    pub total: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardRow {
    pub contestant: ContestantSummary,
    /// The judge's own saved total, if any.
    pub total: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Dashboard {
    pub judge: JudgeKey,
    pub category_title: String,
    pub max_score: Decimal,
    pub progress: JudgeProgress,
    /// Blind round: rows carry contestant numbers instead of names.
    pub names_hidden: bool,
    /// Empty when nothing is assigned to this judge.
    pub contestants: Vec<DashboardRow>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScoringSheet {
    pub contestant: Contestant,
    pub names_hidden: bool,
    pub rubric: Rubric,
    pub max_score: Decimal,
    /// Last saved values, shown back to the judge for review.
    pub existing: Option<ScoreRecord>,
    pub previous: Option<ContestantId>,
    pub next: Option<ContestantId>,
    /// 1-based position within the judge's assignment.
    pub position: usize,
    pub assigned: usize,
}
