// src/services/upstream.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, ORIGIN, REFERER, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::errors::{AggregateError, AppError, UpstreamError};

/// Read access to the sports-data API.
///
/// `path` is relative to the configured base URL and starts with `/`.
/// Implementations return the decoded JSON object or say why they couldn't.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<Value, UpstreamError>;
}

pub fn live_events_path(sport: &str) -> String {
    format!("/sport/{}/events/live", sport)
}

pub fn scheduled_events_path(sport: &str, date: NaiveDate) -> String {
    format!("/sport/{}/scheduled-events/{}", sport, date.format("%Y-%m-%d"))
}

pub fn seasons_path(tournament_id: u64) -> String {
    format!("/tournament/{}/seasons", tournament_id)
}

pub fn season_events_path(tournament_id: u64, season_id: u64) -> String {
    format!("/tournament/{}/season/{}/events", tournament_id, season_id)
}

/// Pulls the array stored under `key`, or reports the response as missing it.
pub fn collection<'a>(
    value: &'a Value,
    path: &str,
    key: &'static str,
) -> Result<&'a Vec<Value>, AggregateError> {
    value
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| AggregateError::MissingCollection {
            path: path.to_string(),
            key,
        })
}

#[derive(Clone)]
pub struct SofaScoreClient {
    base_url: String,
    client: Client,
}

impl SofaScoreClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        for (name, value) in [
            (USER_AGENT, &config.user_agent),
            (REFERER, &config.referer),
            (ORIGIN, &config.origin),
        ] {
            if let Some(value) = value {
                let value = HeaderValue::from_str(value).map_err(|e| {
                    AppError::configuration(format!("invalid {} header: {}", name, e))
                })?;
                headers.insert(name, value);
            }
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn get_json(&self, url: &str) -> Result<Value, UpstreamError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| UpstreamError::Unavailable {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(UpstreamError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| UpstreamError::Unavailable {
                url: url.to_string(),
                source,
            })?;

        let value: Value =
            serde_json::from_slice(&body).map_err(|e| UpstreamError::Malformed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        if !value.is_object() {
            return Err(UpstreamError::Malformed {
                url: url.to_string(),
                reason: "expected a JSON object".to_string(),
            });
        }

        Ok(value)
    }
}

#[async_trait]
impl UpstreamClient for SofaScoreClient {
    async fn fetch(&self, path: &str) -> Result<Value, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let result = self.get_json(&url).await;
        if let Err(e) = &result {
            tracing::warn!("Upstream fetch failed: {}", e);
        }
        result
    }
}
