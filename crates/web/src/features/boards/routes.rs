use axum::{Router, middleware, routing::get};

use super::handlers::{export_board, get_leaderboard, list_boards};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/boards/:id/export", get(export_board))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/boards", get(list_boards))
        .route("/boards/:id", get(get_leaderboard))
        .merge(protected)
}
