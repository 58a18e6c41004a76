use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use super::Category;

/// What a lock toggle applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockScope {
    Global,
    Category(Category),
}

/// Lock flags read from the `system` subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct LockState {
    pub global: bool,
    pub categories: BTreeSet<Category>,
}

impl LockState {
    pub fn from_value(value: Option<Value>) -> Self {
        let mut state = Self::default();
        let Some(Value::Object(system)) = value else {
            return state;
        };

        state.global = system
            .get("locked")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        if let Some(Value::Object(locks)) = system.get("locks") {
            state.categories = locks
                .iter()
                .filter(|(_, flag)| flag.as_bool().unwrap_or(false))
                .map(|(category, _)| Category::new(category.clone()))
                .collect();
        }

        state
    }

    /// True when new sessions for `category` must be refused.
    pub fn blocks(&self, category: &Category) -> bool {
        self.global || self.categories.contains(category)
    }
}
