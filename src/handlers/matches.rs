use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;

use crate::errors::{AppError, Result};
use crate::models::matches::MatchBucket;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    pub days: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SeasonQuery {
    pub season: Option<u64>,
}

// GET /matches?days=N
pub async fn get_matches(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<MatchBucket>> {
    let days = query.days.unwrap_or(state.config.window_days);
    if days == 0 || days > state.config.max_window_days {
        return Err(AppError::invalid_data(format!(
            "days must be between 1 and {}",
            state.config.max_window_days
        )));
    }

    tracing::info!("🔍 GET /matches called with days={}", days);
    let start_time = std::time::Instant::now();

    let bucket = state.aggregator.window(days).await;

    tracing::info!(
        "✅ Window of {} days: {} live, {} upcoming, {} finished in {:?}",
        days,
        bucket.live.len(),
        bucket.upcoming.len(),
        bucket.finished.len(),
        start_time.elapsed()
    );
    Ok(Json(bucket))
}

// GET /matches/all
pub async fn get_all_matches(
    State(state): State<AppState>,
) -> Json<BTreeMap<String, MatchBucket>> {
    let snapshot = state.cache.snapshot();
    tracing::debug!(
        "Serving cache generation {} ({} tournaments)",
        snapshot.generation,
        snapshot.buckets.len()
    );
    Json(snapshot.buckets.clone())
}

// GET /matches/:tournament_id?season=S
pub async fn get_tournament_matches(
    State(state): State<AppState>,
    Path(tournament_id): Path<u64>,
    Query(query): Query<SeasonQuery>,
) -> Json<MatchBucket> {
    tracing::info!(
        "🔍 GET /matches/{} called (season: {:?})",
        tournament_id,
        query.season
    );
    let start_time = std::time::Instant::now();

    let bucket = state
        .aggregator
        .aggregate_tournament(tournament_id, query.season)
        .await;

    tracing::info!(
        "✅ Tournament {}: {} matches in {:?}",
        tournament_id,
        bucket.len(),
        start_time.elapsed()
    );
    Json(bucket)
}
