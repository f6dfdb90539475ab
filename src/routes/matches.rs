use axum::{routing::get, Router};

use crate::handlers::matches;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Date-window feed, fetched on demand
        .route("/", get(matches::get_matches))
        // Every configured tournament, served from the refresh cache
        .route("/all", get(matches::get_all_matches))
        .route("/:tournament_id", get(matches::get_tournament_matches))
}
