use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use scoring::dto::leaderboard::{BoardSummary, Leaderboard, LeaderboardQuery};

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/boards",
    responses(
        (status = 200, description = "Configured leaderboards", body = Vec<BoardSummary>)
    ),
    tag = "boards"
)]
pub async fn list_boards(State(state): State<AppState>) -> Result<Response, WebError> {
    let boards = services::list_boards(&state)?;

    Ok(Json(boards).into_response())
}

#[utoipa::path(
    get,
    path = "/api/boards/{id}",
    params(
        ("id" = String, Path, description = "Board id"),
        LeaderboardQuery
    ),
    responses(
        (status = 200, description = "Ranked leaderboard", body = Leaderboard),
        (status = 400, description = "Invalid curve"),
        (status = 404, description = "Board not found")
    ),
    tag = "boards"
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Response, WebError> {
    query.validate().map_err(WebError::BadRequest)?;

    let board = services::leaderboard(&state, &id, &query).await?;

    Ok(Json(board).into_response())
}

#[utoipa::path(
    get,
    path = "/api/boards/{id}/export",
    params(
        ("id" = String, Path, description = "Board id"),
        LeaderboardQuery
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Leaderboard as comma-separated text", content_type = "text/csv", body = String),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Board not found")
    ),
    tag = "boards"
)]
pub async fn export_board(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Response, WebError> {
    query.validate().map_err(WebError::BadRequest)?;

    let csv = services::export_csv(&state, &id, &query).await?;
    let disposition = format!("attachment; filename=\"{}.csv\"", id);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}
