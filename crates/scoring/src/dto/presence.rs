use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::JudgeId;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusRequest {
    #[validate(length(min = 1, max = 200, message = "Status must be between 1 and 200 characters"))]
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Liveness {
    Active,
    Offline,
    Never,
}

/// Presence of one person, merged across their logical judges.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JudgePresence {
    pub judge: String,
    /// Logical judge whose record was the freshest.
    pub source: Option<JudgeId>,
    pub status: Option<String>,
    pub last_seen: Option<DateTime<Utc>>,
    pub liveness: Liveness,
    pub minutes_ago: Option<i64>,
}
