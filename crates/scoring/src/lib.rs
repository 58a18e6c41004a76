pub mod contest;
pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod sync;

use std::sync::Arc;

pub use contest::{BoardConfig, Contest, ContestConfig};
pub use error::{Result, ScoringError};

use repository::{
    score::ScoreRepository, session::SessionRepository, status::StatusRepository,
    system::SystemRepository,
};
use sync::{MemorySync, SyncService};

/// Handle to the realtime store.
///
/// Created once when the application starts and handed to every component
/// that reads or writes shared state.
#[derive(Clone)]
pub struct Store {
    sync: Arc<dyn SyncService>,
}

impl Store {
    pub fn new(sync: Arc<dyn SyncService>) -> Self {
        Self { sync }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySync::new()))
    }

    pub fn sync(&self) -> &dyn SyncService {
        self.sync.as_ref()
    }

    pub fn scores(&self) -> ScoreRepository<'_> {
        ScoreRepository::new(self.sync())
    }

    pub fn sessions(&self) -> SessionRepository<'_> {
        SessionRepository::new(self.sync())
    }

    pub fn statuses(&self) -> StatusRepository<'_> {
        StatusRepository::new(self.sync())
    }

    pub fn system(&self) -> SystemRepository<'_> {
        SystemRepository::new(self.sync())
    }
}
