use axum::{Router, routing::get};

use super::handlers::list_presence;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/presence", get(list_presence))
}
