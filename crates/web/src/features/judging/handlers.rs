use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use scoring::{
    dto::{
        judging::{Dashboard, LoginRequest, ScoringSheet, SessionResponse, SubmitScoreRequest},
        presence::UpdateStatusRequest,
    },
    models::{ContestantId, JudgeKey, ScoreRecord, StatusRecord},
    ScoringError,
};
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/sessions",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Judge admitted", body = SessionResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Judge is not on the roster for this category"),
        (status = 423, description = "Scoring is locked for new sessions")
    ),
    tag = "judging"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let session = services::login(&state, JudgeKey::new(req.judge, req.category)).await?;
    let info = services::judging(&state).session_info(&session)?;

    Ok(Json(info).into_response())
}

#[utoipa::path(
    get,
    path = "/api/judges/{judge}/{category}/dashboard",
    params(
        ("judge" = String, Path, description = "Judge name"),
        ("category" = String, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Assigned contestants with progress", body = Dashboard),
        (status = 403, description = "Unknown judge or no open session"),
        (status = 423, description = "No open session while scoring is locked")
    ),
    tag = "judging"
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Path((judge, category)): Path<(String, String)>,
) -> Result<Response, WebError> {
    let session = services::resume(&state, judge, category).await?;
    let dashboard = services::judging(&state).dashboard(&session).await?;

    Ok(Json(dashboard).into_response())
}

#[utoipa::path(
    get,
    path = "/api/judges/{judge}/{category}/contestants/{id}",
    params(
        ("judge" = String, Path, description = "Judge name"),
        ("category" = String, Path, description = "Category id"),
        ("id" = String, Path, description = "Contestant id")
    ),
    responses(
        (status = 200, description = "Scoring sheet with the judge's last saved values", body = ScoringSheet),
        (status = 404, description = "Contestant not assigned to this judge"),
        (status = 423, description = "No open session while scoring is locked")
    ),
    tag = "judging"
)]
pub async fn get_scoring_sheet(
    State(state): State<AppState>,
    Path((judge, category, id)): Path<(String, String, String)>,
) -> Result<Response, WebError> {
    let session = services::resume(&state, judge, category).await?;
    let sheet = services::judging(&state)
        .open(&session, &ContestantId::new(id))
        .await?
        .ok_or(ScoringError::NotFound)?;

    Ok(Json(sheet).into_response())
}

#[utoipa::path(
    put,
    path = "/api/judges/{judge}/{category}/contestants/{id}/score",
    params(
        ("judge" = String, Path, description = "Judge name"),
        ("category" = String, Path, description = "Category id"),
        ("id" = String, Path, description = "Contestant id")
    ),
    request_body = SubmitScoreRequest,
    responses(
        (status = 200, description = "Score saved, total recomputed", body = ScoreRecord),
        (status = 400, description = "A criterion is missing, unknown or out of range"),
        (status = 403, description = "Contestant not assigned to this judge"),
        (status = 404, description = "Contestant not found"),
        (status = 423, description = "No open session while scoring is locked"),
        (status = 503, description = "Store unavailable, nothing was saved")
    ),
    tag = "judging"
)]
pub async fn submit_score(
    State(state): State<AppState>,
    Path((judge, category, id)): Path<(String, String, String)>,
    Json(req): Json<SubmitScoreRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let session = services::resume(&state, judge, category).await?;
    let record = services::judging(&state)
        .submit(&session, &ContestantId::new(id), req.details)
        .await?;

    Ok(Json(record).into_response())
}

#[utoipa::path(
    put,
    path = "/api/judges/{judge}/{category}/status",
    params(
        ("judge" = String, Path, description = "Judge name"),
        ("category" = String, Path, description = "Category id")
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status published", body = StatusRecord),
        (status = 400, description = "Validation error")
    ),
    tag = "judging"
)]
pub async fn update_status(
    State(state): State<AppState>,
    Path((judge, category)): Path<(String, String)>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let session = services::resume(&state, judge, category).await?;
    let record = state
        .store
        .statuses()
        .set_status(session.judge_id(), &req.status)
        .await?;

    Ok(Json(record).into_response())
}
