//! Entry gate for judge sessions.
//!
//! Lock flags only stop new sessions from starting. Every admitted session is
//! recorded, so a judge already past the gate keeps scoring while a judge who
//! was refused cannot.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::reset::Confirmation;
use crate::Store;
use crate::contest::Contest;
use crate::error::{Result, ScoringError};
use crate::models::{Category, JudgeId, JudgeKey, LockScope, LockState};
use crate::repository::LockFeed;

/// A judge that has passed the entry gate.
#[derive(Debug, Clone)]
pub struct JudgeSession {
    key: JudgeKey,
    judge_id: JudgeId,
    started_at: DateTime<Utc>,
}

impl JudgeSession {
    pub fn key(&self) -> &JudgeKey {
        &self.key
    }

    pub fn judge_id(&self) -> &JudgeId {
        &self.judge_id
    }

    pub fn category(&self) -> &Category {
        &self.key.category
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

pub struct LockGate<'a> {
    store: &'a Store,
    contest: &'a Contest,
}

impl<'a> LockGate<'a> {
    pub fn new(store: &'a Store, contest: &'a Contest) -> Self {
        Self { store, contest }
    }

    pub async fn state(&self) -> Result<LockState> {
        self.store.system().lock_state().await
    }

    pub async fn subscribe(&self) -> Result<LockFeed> {
        self.store.system().subscribe().await
    }

    pub async fn is_locked(&self, category: &Category) -> Result<bool> {
        Ok(self.state().await?.blocks(category))
    }

    fn refuse(&self, key: &JudgeKey) -> ScoringError {
        warn!(judge = %key, "session refused, scoring is locked");
        ScoringError::Locked(format!(
            "{} is not accepting new judge sessions",
            self.contest.category_title(&key.category)
        ))
    }

    /// Starts a session unless the system, or the judge's category, is locked.
    pub async fn login(&self, key: JudgeKey) -> Result<JudgeSession> {
        let (_, judge_id) = self.contest.resolve(&key)?;

        if self.is_locked(&key.category).await? {
            return Err(self.refuse(&key));
        }

        let started_at = self.store.sessions().admit(&judge_id).await?;

        info!(judge = %key, id = %judge_id, "judge session started");
        Ok(JudgeSession {
            key,
            judge_id,
            started_at,
        })
    }

    /// Continues a recorded session. Lock flags are only consulted when the
    /// judge was never admitted.
    pub async fn resume(&self, key: JudgeKey) -> Result<JudgeSession> {
        let (_, judge_id) = self.contest.resolve(&key)?;

        match self.store.sessions().started_at(&judge_id).await? {
            Some(started_at) => Ok(JudgeSession {
                key,
                judge_id,
                started_at,
            }),
            None if self.is_locked(&key.category).await? => Err(self.refuse(&key)),
            None => Err(ScoringError::UnknownJudge(format!("{} has no open session", key))),
        }
    }

    pub async fn set_locked(
        &self,
        scope: &LockScope,
        locked: bool,
        _confirmation: Confirmation,
    ) -> Result<LockState> {
        if let LockScope::Category(category) = scope {
            if !self.contest.categories().iter().any(|c| c.id == *category) {
                return Err(ScoringError::NotFound);
            }
        }

        self.store.system().set_locked(scope, locked).await?;
        self.state().await
    }
}
