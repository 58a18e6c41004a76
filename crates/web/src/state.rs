use std::sync::Arc;

use scoring::services::rubric::RubricSelector;
use scoring::{Contest, Store};

/// Shared handles for every request.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub contest: Arc<Contest>,
    pub rubrics: Arc<RubricSelector>,
}

impl AppState {
    pub fn new(store: Store, contest: Contest, rubrics: RubricSelector) -> Self {
        Self {
            store,
            contest: Arc::new(contest),
            rubrics: Arc::new(rubrics),
        }
    }
}
