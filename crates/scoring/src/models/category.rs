use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const INDIVIDUAL: &str = "individual";
pub const TEAM: &str = "team";

/// Top-level partition of the contest, judged independently of the others.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn individual() -> Self {
        Self::new(INDIVIDUAL)
    }

    pub fn team() -> Self {
        Self::new(TEAM)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryInfo {
    pub id: Category,
    pub title: String,
    /// Rounds whose judges see contestant numbers instead of names.
    #[serde(default)]
    pub blind_rounds: BTreeSet<u8>,
}
