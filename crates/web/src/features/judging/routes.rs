use axum::{
    Router,
    routing::{get, post, put},
};

use super::handlers::{get_dashboard, get_scoring_sheet, login, submit_score, update_status};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(login))
        .route("/judges/:judge/:category/dashboard", get(get_dashboard))
        .route("/judges/:judge/:category/status", put(update_status))
        .route(
            "/judges/:judge/:category/contestants/:id",
            get(get_scoring_sheet),
        )
        .route(
            "/judges/:judge/:category/contestants/:id/score",
            put(submit_score),
        )
}
