// src/errors.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure of a single request against the sports-data API.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("request to {url} failed: {source}")]
    Unavailable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("malformed response from {url}: {reason}")]
    Malformed { url: String, reason: String },
}

/// Why one tournament (or one feed) produced no matches.
///
/// These never reach an HTTP caller: the aggregator logs them and hands back
/// an empty bucket instead.
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("no season found for tournament {0}")]
    SeasonNotFound(u64),

    #[error("response for {path} has no '{key}' list")]
    MissingCollection { path: String, key: &'static str },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, "Validation failed"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Not found"),
            AppError::ConfigurationError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error")
            }
            AppError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO error"),
        };

        let body = Json(json!({
            "error": error_message,
            "message": self.to_string(),
            "success": false,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }));

        (status, body).into_response()
    }
}

// Helper conversion functions
impl AppError {
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::ConfigurationError(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
