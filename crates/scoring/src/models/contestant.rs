use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use super::Category;

/// Stable contestant identity.
///
/// Rosters may list ids as numbers while the store keys them as strings, so the
/// id is always held in its normalized string form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String)]
pub struct ContestantId(String);

impl ContestantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContestantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContestantId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ContestantId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<u32> for ContestantId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ContestantId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Ok(Self(n.to_string())),
            RawId::Text(s) => Ok(Self::new(s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Contestant {
    pub id: ContestantId,
    pub category: Category,
    #[serde(default)]
    pub name: Option<String>,
    /// Team members, for categories that score groups rather than individuals.
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl Contestant {
    /// Name, or the member list joined when the contestant is a group.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => self.members.join(", "),
        }
    }

    /// Copy with identifying fields replaced by the contestant number.
    pub fn anonymized(&self) -> Self {
        Self {
            name: Some(format!("Contestant {}", self.id)),
            members: Vec::new(),
            team: None,
            ..self.clone()
        }
    }
}
