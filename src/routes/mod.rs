use axum::{http::Method, routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::health;
use crate::state::AppState;

pub mod matches;
pub mod tournaments;

pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
        .allow_credentials(false);

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_check))
        .nest("/matches", matches::routes())
        .nest("/tournaments", tournaments::routes())
        .fallback(health::not_found)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::AppConfig;
    use crate::models::matches::MatchBucket;
    use crate::services::upstream::testing::FakeUpstream;

    fn state_with(upstream: FakeUpstream) -> AppState {
        let config = AppConfig::from_lookup(|key| match key {
            "TEAM_LOGO_TEMPLATE" => Some("https://logo/{id}".to_string()),
            _ => None,
        })
        .unwrap();
        AppState::new(config, Arc::new(upstream))
    }

    async fn send_get(state: AppState, uri: &str) -> (StatusCode, Value) {
        let response = build_router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    #[tokio::test]
    async fn lists_tournaments() {
        let (status, body) = send_get(state_with(FakeUpstream::new()), "/tournaments").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0], json!({ "name": "Premier League", "id": 17 }));
        assert_eq!(body.as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn all_matches_come_from_the_cache() {
        let upstream = FakeUpstream::new();
        let state = state_with(upstream);

        let mut buckets = BTreeMap::new();
        buckets.insert("Premier League".to_string(), MatchBucket::default());
        state.cache.replace(buckets);

        let (status, body) = send_get(state, "/matches/all").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "Premier League": { "live": [], "upcoming": [], "finished": [] } })
        );
    }

    #[tokio::test]
    async fn tournament_matches_are_fetched_on_demand() {
        let upstream = FakeUpstream::new()
            .with_json("/tournament/17/seasons", json!({ "seasons": [{ "id": 61627 }] }))
            .with_json(
                "/tournament/17/season/61627/events",
                json!({ "events": [{
                    "id": 5,
                    "tournament": { "name": "Premier League" },
                    "homeTeam": { "id": 42, "name": "Arsenal" },
                    "awayTeam": { "id": 33, "name": "Tottenham" },
                    "homeScore": { "current": 3 },
                    "awayScore": { "current": 2 },
                    "status": { "code": 100, "description": "Ended", "type": "finished" },
                    "startTimestamp": 1_713_899_700,
                }]}),
            );

        let (status, body) = send_get(state_with(upstream), "/matches/17").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["finished"][0]["id"], 5);
        assert_eq!(body["finished"][0]["home"]["logoUrl"], "https://logo/42");
        assert_eq!(body["finished"][0]["away"]["score"], 2);
        assert_eq!(body["live"], json!([]));
    }

    #[tokio::test]
    async fn upstream_failure_is_still_a_200_with_empty_buckets() {
        let upstream = FakeUpstream::new().with_status("/tournament/8/seasons", 503);

        let (status, body) = send_get(state_with(upstream), "/matches/8").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "live": [], "upcoming": [], "finished": [] }));
    }

    #[tokio::test]
    async fn window_feed_validates_days() {
        let (status, body) = send_get(state_with(FakeUpstream::new()), "/matches?days=30").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, body) = send_get(state_with(FakeUpstream::new()), "/matches?days=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "live": [], "upcoming": [], "finished": [] }));
    }

    #[tokio::test]
    async fn health_reports_cache_generation() {
        let state = state_with(FakeUpstream::new());
        state.cache.replace(BTreeMap::new());

        let (status, body) = send_get(state, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["cache"]["generation"], 1);
        assert!(body["cache"]["refreshedAt"].is_string());
    }

    #[tokio::test]
    async fn unknown_routes_are_json_404s() {
        let (status, body) = send_get(state_with(FakeUpstream::new()), "/fixtures").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not found");
    }
}
