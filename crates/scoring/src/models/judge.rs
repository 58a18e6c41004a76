use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Category, ContestantId};

/// Identity handed over by the authentication boundary: a person judging one category.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
pub struct JudgeKey {
    pub human: String,
    pub category: Category,
}

impl JudgeKey {
    pub fn new(human: impl Into<String>, category: Category) -> Self {
        Self {
            human: human.into(),
            category,
        }
    }
}

impl fmt::Display for JudgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.human, self.category)
    }
}

/// Storage key of a logical judge under `scores/` and `status/`.
///
/// Derived from a [`JudgeKey`] by [`JudgeProfile::judge_id`], or read back from
/// the store. Two logical judges of the same person share nothing in the store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String)]
pub struct JudgeId(String);

impl JudgeId {
    pub fn resolve(key: &JudgeKey, home: &Category) -> Self {
        if key.category == *home {
            Self(key.human.clone())
        } else {
            Self(format!("{}_{}", key.human, key.category))
        }
    }

    pub fn from_storage_key(key: &str) -> Self {
        Self(key.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JudgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A person on the judging roster.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JudgeProfile {
    pub name: String,
    /// Categories this person judges; the first is their home category.
    pub categories: Vec<Category>,
    /// Scoring phase; round 2 judges score the shortlist only.
    #[serde(default = "default_round")]
    pub round: u8,
    /// Explicit, ordered contestant lists per category. No entry means "everyone".
    #[serde(default)]
    pub assignments: BTreeMap<Category, Vec<ContestantId>>,
}

fn default_round() -> u8 {
    1
}

impl JudgeProfile {
    pub fn home_category(&self) -> Option<&Category> {
        self.categories.first()
    }

    pub fn judges(&self, category: &Category) -> bool {
        self.categories.contains(category)
    }

    pub fn key(&self, category: &Category) -> JudgeKey {
        JudgeKey::new(self.name.clone(), category.clone())
    }

    /// Storage key for this person's judging in `category`, if they judge it.
    pub fn judge_id(&self, category: &Category) -> Option<JudgeId> {
        if !self.judges(category) {
            return None;
        }
        let home = self.home_category()?;
        Some(JudgeId::resolve(&self.key(category), home))
    }

    /// Every logical judge this person acts as, home category first.
    pub fn judge_ids(&self) -> Vec<JudgeId> {
        self.categories
            .iter()
            .filter_map(|category| self.judge_id(category))
            .collect()
    }

    pub fn assignment(&self, category: &Category) -> Option<&[ContestantId]> {
        self.assignments.get(category).map(Vec::as_slice)
    }
}
