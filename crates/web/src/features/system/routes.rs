use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::handlers::{get_lock, reset, set_lock};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/system/lock", put(set_lock))
        .route("/system/reset", post(reset))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/system/lock", get(get_lock))
        .merge(protected)
}
