use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::json;
use tracing::warn;

use llm_rewriter::LlmError;

use crate::analysis::AnalysisError;

/// Error returned by HTTP handlers, rendered as `{"error": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("invalid request body: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Analysis(AnalysisError::EmptyPrompt) => {
                StatusCode::BAD_REQUEST
            }
            Self::Analysis(AnalysisError::AiUnavailable)
            | Self::Analysis(AnalysisError::Llm(LlmError::MissingApiKey(_))) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::Analysis(AnalysisError::Llm(_)) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            warn!(status = status.as_u16(), error = %message, "request failed");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
