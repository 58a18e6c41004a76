use anyhow::Context;
use scoring::{Contest, Store, services::rubric::RubricSelector};
use tokio::net::TcpListener;
use utoipa::OpenApi;

mod config;
mod error;
mod features;
mod middleware;
mod routes;
mod state;

use config::Config;
use features::{boards, judging, presence, system};
use middleware::auth::ApiKeys;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        judging::handlers::login,
        judging::handlers::get_dashboard,
        judging::handlers::get_scoring_sheet,
        judging::handlers::submit_score,
        judging::handlers::update_status,
        boards::handlers::list_boards,
        boards::handlers::get_leaderboard,
        boards::handlers::export_board,
        presence::handlers::list_presence,
        system::handlers::get_lock,
        system::handlers::set_lock,
        system::handlers::reset,
    ),
    components(
        schemas(
            scoring::dto::judging::LoginRequest,
            scoring::dto::judging::SessionResponse,
            scoring::dto::judging::SubmitScoreRequest,
            scoring::dto::judging::Dashboard,
            scoring::dto::judging::DashboardRow,
            scoring::dto::judging::JudgeProgress,
            scoring::dto::judging::ScoringSheet,
            scoring::dto::leaderboard::Leaderboard,
            scoring::dto::leaderboard::LeaderboardEntry,
            scoring::dto::leaderboard::JudgeCell,
            scoring::dto::leaderboard::ContestantSummary,
            scoring::dto::leaderboard::BoardSummary,
            scoring::dto::presence::UpdateStatusRequest,
            scoring::dto::presence::JudgePresence,
            scoring::dto::presence::Liveness,
            scoring::dto::system::LockRequest,
            scoring::dto::system::ResetRequest,
            scoring::dto::system::ResetScope,
            scoring::dto::system::ResetOutcome,
            scoring::models::Category,
            scoring::models::Contestant,
            scoring::models::ContestantId,
            scoring::models::JudgeKey,
            scoring::models::JudgeId,
            scoring::models::Rubric,
            scoring::models::Criterion,
            scoring::models::ScoreRecord,
            scoring::models::StatusRecord,
            scoring::models::LockState,
            scoring::services::aggregation::RoundingMode,
        )
    ),
    tags(
        (name = "judging", description = "Judge sessions, scoring sheets and submissions"),
        (name = "boards", description = "Live leaderboards and exports"),
        (name = "presence", description = "Judge activity"),
        (name = "system", description = "Locks and resets"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting contest scoring API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!("Loading contest from: {}", config.contest_path);
    let contest = Contest::load(&config.contest_path).context("Failed to load contest configuration")?;
    tracing::info!(
        "Contest '{}' loaded with {} judges and {} boards",
        contest.name(),
        contest.judges().len(),
        contest.boards().len()
    );

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("ADMIN_API_KEYS is empty, administrator routes will refuse every request");
    }

    let state = AppState::new(Store::in_memory(), contest, RubricSelector::standard());
    let app = routes::router(state, api_keys);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "OpenAPI document available at http://{}/api-docs/openapi.json",
        bind_address
    );

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, app).await?;

    Ok(())
}
