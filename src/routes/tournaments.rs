use axum::{routing::get, Router};

use crate::handlers::tournaments;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(tournaments::get_tournaments))
}
