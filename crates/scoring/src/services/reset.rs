//! Administrative resets. There is no undo: every reset needs a [`Confirmation`].

use tracing::info;

use crate::Store;
use crate::contest::Contest;
use crate::dto::system::{ResetOutcome, ResetScope};
use crate::error::{Result, ScoringError};
use crate::models::{JudgeId, JudgeKey};

/// Proof that an administrator explicitly confirmed a destructive action.
#[derive(Debug)]
pub struct Confirmation {
    _private: (),
}

impl Confirmation {
    pub fn require(confirmed: bool) -> Result<Self> {
        if confirmed {
            Ok(Self { _private: () })
        } else {
            Err(ScoringError::ConfirmationRequired)
        }
    }
}

pub fn judges_in_scope(contest: &Contest, scope: &ResetScope) -> Result<Vec<JudgeId>> {
    match scope {
        ResetScope::Board(id) => {
            let board = contest.board(id).ok_or(ScoringError::NotFound)?;
            board
                .judges
                .iter()
                .map(|name| {
                    let key = JudgeKey::new(name.clone(), board.category.clone());
                    contest.resolve(&key).map(|(_, id)| id)
                })
                .collect()
        }
        ResetScope::Category(category) => {
            if !contest.categories().iter().any(|c| c.id == *category) {
                return Err(ScoringError::NotFound);
            }
            Ok(contest.judge_ids_in(category))
        }
        ResetScope::Judges { category, names } => names
            .iter()
            .map(|name| {
                let key = JudgeKey::new(name.clone(), category.clone());
                contest.resolve(&key).map(|(_, id)| id)
            })
            .collect(),
    }
}

/// Deletes every score of the judges in `scope` in one store update, then
/// clears their status records. Other judges and the lock flags are untouched.
pub async fn reset(
    store: &Store,
    contest: &Contest,
    scope: &ResetScope,
    _confirmation: Confirmation,
) -> Result<ResetOutcome> {
    let judges = judges_in_scope(contest, scope)?;

    store.scores().delete_scope(&judges).await?;
    store.statuses().clear(&judges).await?;

    info!(?scope, judges = ?judges, "reset completed");
    Ok(ResetOutcome { judges })
}
