use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use scoring::{dto::presence::JudgePresence, services::presence};

use crate::error::WebError;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/presence",
    responses(
        (status = 200, description = "Latest activity of every judge", body = Vec<JudgePresence>)
    ),
    tag = "presence"
)]
pub async fn list_presence(State(state): State<AppState>) -> Result<Response, WebError> {
    let statuses = state.store.statuses().snapshot().await?;
    let board = presence::presence_board(&state.contest, &statuses, Utc::now());

    Ok(Json(board).into_response())
}
