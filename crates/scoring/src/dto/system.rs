use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Category, JudgeId, LockScope};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LockRequest {
    pub locked: bool,
    /// Lock a single category instead of the whole system.
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub confirm: bool,
}

impl LockRequest {
    pub fn scope(&self) -> LockScope {
        match &self.category {
            Some(category) => LockScope::Category(category.clone()),
            None => LockScope::Global,
        }
    }
}

/// Which judges a reset wipes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResetScope {
    /// Every judge column of a leaderboard board.
    Board(String),
    /// Every logical judge of a category.
    Category(Category),
    /// Explicit judge names, resolved in `category`.
    Judges { category: Category, names: Vec<String> },
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResetRequest {
    pub scope: ResetScope,
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResetOutcome {
    pub judges: Vec<JudgeId>,
}
