use serde_json::Value;
use tracing::info;

use super::{Feed, LockFeed, SYSTEM};
use crate::error::Result;
use crate::models::{LockScope, LockState};
use crate::sync::{StorePath, SyncService};

/// Lock flags: `system/locked` and `system/locks/{category}`.
pub struct SystemRepository<'a> {
    sync: &'a dyn SyncService,
}

impl<'a> SystemRepository<'a> {
    pub fn new(sync: &'a dyn SyncService) -> Self {
        Self { sync }
    }

    fn root() -> Result<StorePath> {
        Ok(StorePath::root().child(SYSTEM)?)
    }

    fn flag_path(scope: &LockScope) -> Result<StorePath> {
        let path = match scope {
            LockScope::Global => Self::root()?.child("locked")?,
            LockScope::Category(category) => {
                Self::root()?.child("locks")?.child(category.as_str())?
            }
        };
        Ok(path)
    }

    pub async fn lock_state(&self) -> Result<LockState> {
        Ok(self.subscribe().await?.current())
    }

    pub async fn subscribe(&self) -> Result<LockFeed> {
        let subscription = self.sync.subscribe(&Self::root()?).await?;
        Ok(Feed::new(subscription))
    }

    pub async fn set_locked(&self, scope: &LockScope, locked: bool) -> Result<()> {
        self.sync
            .set(&Self::flag_path(scope)?, Value::Bool(locked))
            .await?;

        info!(?scope, locked, "lock flag changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::sync::MemorySync;

    #[tokio::test]
    async fn flags_round_trip_through_store() {
        let store = MemorySync::new();
        let repo = SystemRepository::new(&store);

        repo.set_locked(&LockScope::Category(Category::team()), true)
            .await
            .unwrap();
        let state = repo.lock_state().await.unwrap();
        assert!(state.blocks(&Category::team()));
        assert!(!state.global);

        repo.set_locked(&LockScope::Global, true).await.unwrap();
        repo.set_locked(&LockScope::Category(Category::team()), false)
            .await
            .unwrap();
        let state = repo.lock_state().await.unwrap();
        assert!(state.global);
        assert!(state.categories.is_empty());
    }
}
