use axum::{http::StatusCode, response::IntoResponse, Json};
use helpy_core::StoreError;
use helpy_matcher::MatchError;
use serde_json::json;
use thiserror::Error;

/// Top-level API error shared by all route handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("validation error")]
    Validation(serde_json::Value),
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::SerdeJson(_) => StatusCode::BAD_REQUEST,
            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        let payload = match self {
            ApiError::Validation(v) => v,
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(payload)).into_response()
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::JobNotFound(_) | StoreError::UserNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            StoreError::InvalidJobData(_) => Self::BadRequest(err.to_string()),
            StoreError::Unavailable(_) => Self::Unavailable(err.to_string()),
        }
    }
}

impl From<MatchError> for ApiError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::JobNotFound(_) | MatchError::UserNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            MatchError::InvalidJobData(_) => Self::BadRequest(err.to_string()),
            MatchError::Directory(_) => Self::Unavailable(err.to_string()),
            MatchError::UnknownCriterion(_) => Self::Unexpected(err.to_string()),
        }
    }
}
