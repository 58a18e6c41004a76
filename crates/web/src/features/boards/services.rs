use scoring::{
    Result, ScoringError,
    dto::leaderboard::{BoardSummary, Leaderboard, LeaderboardQuery},
    services::{aggregation::BoardView, export},
};

use crate::state::AppState;

pub fn list_boards(state: &AppState) -> Result<Vec<BoardSummary>> {
    state
        .contest
        .boards()
        .iter()
        .map(|board| BoardView::resolve(&state.contest, &state.rubrics, board).map(|v| v.summary()))
        .collect()
}

/// Ranks the board against the current score snapshot.
pub async fn leaderboard(state: &AppState, id: &str, query: &LeaderboardQuery) -> Result<Leaderboard> {
    let view = BoardView::find(&state.contest, &state.rubrics, id)?.ok_or(ScoringError::NotFound)?;
    let snapshot = state.store.scores().snapshot().await?;

    Ok(view.leaderboard(&snapshot, query.curve, query.rounding))
}

pub async fn export_csv(state: &AppState, id: &str, query: &LeaderboardQuery) -> Result<String> {
    let board = leaderboard(state, id, query).await?;
    Ok(export::to_csv(&export::format(&board)))
}
