use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::state::AppState;

pub async fn root_handler() -> &'static str {
    "⚽ SwiftScore API: live, upcoming and finished football matches"
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let snapshot = state.cache.snapshot();

    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "cache": {
            "generation": snapshot.generation,
            "refreshedAt": snapshot.refreshed_at.map(|t| t.to_rfc3339()),
            "tournaments": snapshot.buckets.len(),
        },
    }))
}

pub async fn not_found(uri: axum::http::Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}
