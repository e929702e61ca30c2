use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::{DateTime, Utc};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid window: {from} is after {to}")]
    InvalidWindow {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },

    #[error("Data point out of window: bucket {index} outside 0..{len}")]
    PointOutOfWindow { index: i64, len: usize },

    #[error("Unsupported granularity: {0}")]
    UnsupportedGranularity(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        let status = match &self {
            ReportError::InvalidWindow { .. }
            | ReportError::PointOutOfWindow { .. }
            | ReportError::UnsupportedGranularity(_)
            | ReportError::Validation(_) => {
                tracing::debug!("Rejected report request: {}", self);
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ReportError::Io(e) => {
                tracing::error!("IO error: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type ReportResult<T> = Result<T, ReportError>;
