use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use scoring::{
    dto::system::{LockRequest, ResetOutcome, ResetRequest},
    models::LockState,
};

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/system/lock",
    responses(
        (status = 200, description = "Current lock flags", body = LockState)
    ),
    tag = "system"
)]
pub async fn get_lock(State(state): State<AppState>) -> Result<Response, WebError> {
    let lock = services::lock_state(&state).await?;

    Ok(Json(lock).into_response())
}

#[utoipa::path(
    put,
    path = "/api/system/lock",
    request_body = LockRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Lock flags after the change", body = LockState),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Unknown category"),
        (status = 409, description = "Confirmation required")
    ),
    tag = "system"
)]
pub async fn set_lock(
    State(state): State<AppState>,
    Json(req): Json<LockRequest>,
) -> Result<Response, WebError> {
    let lock = services::set_lock(&state, &req).await?;

    Ok(Json(lock).into_response())
}

#[utoipa::path(
    post,
    path = "/api/system/reset",
    request_body = ResetRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Scores and statuses of the listed judges were deleted", body = ResetOutcome),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Unknown board or category"),
        (status = 409, description = "Confirmation required")
    ),
    tag = "system"
)]
pub async fn reset(
    State(state): State<AppState>,
    Json(req): Json<ResetRequest>,
) -> Result<Response, WebError> {
    let outcome = services::reset(&state, &req).await?;

    Ok(Json(outcome).into_response())
}
