use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Upstream request failed: {url} - {reason}")]
    UpstreamFailed { url: String, reason: String },

    #[error("Upstream timeout for URL: {0}")]
    UpstreamTimeout(String),

    #[error("Invalid upstream payload: {0}")]
    InvalidUpstreamPayload(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: String,
}

impl Error {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UpstreamFailed { .. } => "UPSTREAM_FAILED",
            Self::UpstreamTimeout(_) => "UPSTREAM_TIMEOUT",
            Self::InvalidUpstreamPayload(_) => "INVALID_UPSTREAM_PAYLOAD",
            Self::MissingParameter(_) => "MISSING_PARAMETER",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UpstreamFailed { .. } | Self::InvalidUpstreamPayload(_) => {
                StatusCode::BAD_GATEWAY
            }
            Self::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::MissingParameter(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.error_code().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::UpstreamTimeout(e.url().map(|u| u.to_string()).unwrap_or_default())
        } else {
            Self::UpstreamFailed {
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
                reason: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidUpstreamPayload(e.to_string())
    }
}
