use scoring::{
    Result,
    dto::system::{LockRequest, ResetOutcome, ResetRequest},
    models::LockState,
    services::{
        gate::LockGate,
        reset::{self, Confirmation},
    },
};

use crate::state::AppState;

pub async fn lock_state(state: &AppState) -> Result<LockState> {
    LockGate::new(&state.store, &state.contest).state().await
}

pub async fn set_lock(state: &AppState, req: &LockRequest) -> Result<LockState> {
    let confirmation = Confirmation::require(req.confirm)?;
    LockGate::new(&state.store, &state.contest)
        .set_locked(&req.scope(), req.locked, confirmation)
        .await
}

pub async fn reset(state: &AppState, req: &ResetRequest) -> Result<ResetOutcome> {
    let confirmation = Confirmation::require(req.confirm)?;
    reset::reset(&state.store, &state.contest, &req.scope, confirmation).await
}
