use axum::{Json, Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::features::{boards, judging, presence, system};
use crate::middleware::auth::ApiKeys;
use crate::state::AppState;
use crate::ApiDoc;

pub fn router(state: AppState, api_keys: ApiKeys) -> Router {
    let api = Router::new()
        .merge(judging::routes::routes())
        .merge(boards::routes::routes(api_keys.clone()))
        .merge(presence::routes::routes())
        .merge(system::routes::routes(api_keys));

    Router::new()
        .nest("/api", api)
        .route("/api-docs/openapi.json", get(openapi))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use scoring::{ContestConfig, Store, services::rubric::RubricSelector};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use scoring::Contest;

    const CONTEST_JSON: &str = include_str!("../../../../config/contest.json");
    const ADMIN_KEY: &str = "secret";

    fn app() -> Router {
        let contest = Contest::new(ContestConfig::from_json_str(CONTEST_JSON).unwrap()).unwrap();
        let state = AppState::new(Store::in_memory(), contest, RubricSelector::standard());
        router(state, ApiKeys::from_comma_separated(ADMIN_KEY))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>, admin: bool) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if admin {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_KEY));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn json_body(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    async fn login(app: &Router, judge: &str, category: &str) {
        let (status, _) = send(
            app,
            "POST",
            "/api/sessions",
            Some(json!({ "judge": judge, "category": category })),
            false,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    fn round_one(ux: u32) -> Value {
        json!({ "details": { "visual": 2, "creativity": 3, "ux": ux, "polish": 2 } })
    }

    #[tokio::test]
    async fn login_returns_rubric_for_namespaced_judge() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/sessions",
            Some(json!({ "judge": "Laayba", "category": "team" })),
            false,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let body = json_body(&body);
        assert_eq!(body["judge_id"], "Laayba_team");
        assert_eq!(body["category_title"], "Team");
        assert_eq!(body["assigned"], 2);
    }

    #[tokio::test]
    async fn lock_stops_new_logins_but_not_scoring() {
        let app = app();
        login(&app, "Mariam", "individual").await;

        let (status, _) = send(&app, "PUT", "/api/system/lock", Some(json!({ "locked": true })), true).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = send(
            &app,
            "PUT",
            "/api/system/lock",
            Some(json!({ "locked": true, "confirm": true })),
            true,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body)["global"], true);

        let (status, _) = send(
            &app,
            "POST",
            "/api/sessions",
            Some(json!({ "judge": "Khaleel", "category": "individual" })),
            false,
        )
        .await;
        assert_eq!(status, StatusCode::LOCKED);

        let (status, body) = send(
            &app,
            "PUT",
            "/api/judges/Mariam/individual/contestants/3/score",
            Some(round_one(3)),
            false,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body)["total"], "10");
    }

    #[tokio::test]
    async fn judges_without_a_session_cannot_score() {
        let app = app();
        let uri = "/api/judges/Khaleel/individual/contestants/3/score";

        let (status, _) = send(&app, "PUT", uri, Some(round_one(3)), false).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            &app,
            "PUT",
            "/api/system/lock",
            Some(json!({ "locked": true, "confirm": true })),
            true,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, "PUT", uri, Some(round_one(3)), false).await;
        assert_eq!(status, StatusCode::LOCKED);

        let (status, _) = send(&app, "GET", "/api/judges/Khaleel/individual/dashboard", None, false).await;
        assert_eq!(status, StatusCode::LOCKED);

        let (_, body) = send(&app, "GET", "/api/boards/round1", None, false).await;
        let board = json_body(&body);
        assert!(board["entries"].as_array().unwrap().iter().all(|e| e["raw_total"] == "0"));
    }

    #[tokio::test]
    async fn blind_round_sheets_hide_contestant_names() {
        let app = app();
        login(&app, "Mariam", "individual").await;
        login(&app, "MrRashed", "individual").await;

        let (status, body) = send(&app, "GET", "/api/judges/Mariam/individual/contestants/4", None, false).await;
        assert_eq!(status, StatusCode::OK);
        let sheet = json_body(&body);
        assert_eq!(sheet["names_hidden"], true);
        assert_eq!(sheet["contestant"]["name"], "Contestant 4");

        let (_, body) = send(&app, "GET", "/api/judges/MrRashed/individual/contestants/4", None, false).await;
        let sheet = json_body(&body);
        assert_eq!(sheet["names_hidden"], false);
        assert_eq!(sheet["contestant"]["name"], "Yusuf Karim");
    }

    #[tokio::test]
    async fn invalid_scores_are_rejected_without_touching_the_store() {
        let app = app();
        let uri = "/api/judges/Laayba/individual/contestants/1/score";
        login(&app, "Laayba", "individual").await;

        let (status, _) = send(&app, "PUT", uri, Some(round_one(2)), false).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "PUT", uri, Some(round_one(4)), false).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json_body(&body)["error"].as_str().unwrap().contains("ux"));

        let (status, body) = send(&app, "GET", "/api/judges/Laayba/individual/contestants/1", None, false).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body)["existing"]["total"], "9");
    }

    #[tokio::test]
    async fn unassigned_contestants_are_forbidden() {
        let app = app();
        login(&app, "MrRashed", "individual").await;
        let (status, _) = send(
            &app,
            "PUT",
            "/api/judges/MrRashed/individual/contestants/1/score",
            Some(json!({ "details": { "visual": 1 } })),
            false,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, "GET", "/api/judges/MrRashed/individual/contestants/1", None, false).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn leaderboard_applies_curve_and_rounding() {
        let app = app();
        login(&app, "Laayba", "individual").await;
        send(
            &app,
            "PUT",
            "/api/judges/Laayba/individual/contestants/2/score",
            Some(json!({ "details": { "visual": 2, "creativity": 2, "ux": 2, "polish": 1 } })),
            false,
        )
        .await;

        let (status, body) = send(&app, "GET", "/api/boards/round1?curve=1.5&rounding=floor", None, false).await;
        assert_eq!(status, StatusCode::OK);
        let board = json_body(&body);
        assert_eq!(board["max_score"], "30");
        assert_eq!(board["entries"][0]["contestant"]["id"], "2");
        assert_eq!(board["entries"][0]["final_score"], "8");
        assert_eq!(board["entries"][0]["is_complete"], false);

        let (status, _) = send(&app, "GET", "/api/boards/finals", None, false).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn export_requires_admin_key() {
        let app = app();

        let (status, _) = send(&app, "GET", "/api/boards/round1/export", None, false).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(&app, "GET", "/api/boards/round1/export", None, true).await;
        assert_eq!(status, StatusCode::OK);
        let csv = String::from_utf8(body).unwrap();
        assert!(csv.starts_with("Rank,Contestant,Section,Group,Website,Laayba,Mariam,Khaleel,Raw Total (/30)"));
    }

    #[tokio::test]
    async fn reset_clears_board_scores_and_presence() {
        let app = app();
        login(&app, "Mariam", "individual").await;
        send(&app, "GET", "/api/judges/Mariam/individual/dashboard", None, false).await;
        send(
            &app,
            "PUT",
            "/api/judges/Mariam/individual/contestants/1/score",
            Some(round_one(1)),
            false,
        )
        .await;

        let (_, body) = send(&app, "GET", "/api/presence", None, false).await;
        let presence = json_body(&body);
        let mariam = presence
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["judge"] == "Mariam")
            .unwrap()
            .clone();
        assert_eq!(mariam["liveness"], "active");
        assert_eq!(mariam["status"], "Viewing Dashboard (Individual)");

        let (status, body) = send(
            &app,
            "POST",
            "/api/system/reset",
            Some(json!({ "scope": { "board": "round1" }, "confirm": true })),
            true,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body)["judges"], json!(["Laayba", "Mariam", "Khaleel"]));

        let (_, body) = send(&app, "GET", "/api/boards/round1", None, false).await;
        assert_eq!(json_body(&body)["entries"][0]["raw_total"], "0");

        let (_, body) = send(&app, "GET", "/api/presence", None, false).await;
        assert!(json_body(&body).as_array().unwrap().iter().all(|p| p["liveness"] == "never"));
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None, false).await;

        assert_eq!(status, StatusCode::OK);
        assert!(json_body(&body)["paths"]["/api/boards/{id}"].is_object());
    }
}
