use axum::{extract::State, response::Json};

use crate::models::tournament::Tournament;
use crate::state::AppState;

// GET /tournaments
pub async fn get_tournaments(State(state): State<AppState>) -> Json<Vec<Tournament>> {
    Json(state.config.tournaments.clone())
}
