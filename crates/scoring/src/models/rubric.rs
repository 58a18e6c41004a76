use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Criterion {
    pub id: String,
    pub label: String,
    pub max: Decimal,
    #[serde(default)]
    pub description: String,
}

impl Criterion {
    pub fn new(id: &str, label: &str, max: u32, description: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            max: Decimal::from(max),
            description: description.to_string(),
        }
    }
}

/// Ordered scoring criteria. The maximum is always derived from the criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Rubric {
    pub name: String,
    pub criteria: Vec<Criterion>,
}

impl Rubric {
    pub fn new(name: impl Into<String>, criteria: Vec<Criterion>) -> Self {
        Self {
            name: name.into(),
            criteria,
        }
    }

    pub fn max_score(&self) -> Decimal {
        self.criteria.iter().map(|c| c.max).sum()
    }

    pub fn criterion(&self, id: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.id == id)
    }
}
