use scoring::{
    Result,
    models::{Category, JudgeKey},
    services::{
        gate::{JudgeSession, LockGate},
        judging::JudgingService,
    },
};

use crate::state::AppState;

/// Passes the entry gate. Refused while the judge's category is locked.
pub async fn login(state: &AppState, key: JudgeKey) -> Result<JudgeSession> {
    LockGate::new(&state.store, &state.contest).login(key).await
}

/// Session for a judge that already logged in. Judges with no recorded
/// session are refused, with `Locked` while the gate is closed.
pub async fn resume(state: &AppState, judge: String, category: String) -> Result<JudgeSession> {
    LockGate::new(&state.store, &state.contest)
        .resume(JudgeKey::new(judge, Category::new(category)))
        .await
}

pub fn judging(state: &AppState) -> JudgingService<'_> {
    JudgingService::new(&state.store, &state.contest, &state.rubrics)
}
