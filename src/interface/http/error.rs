//! HTTP 오류 응답 변환.
//! 클라이언트에는 `{"error": "..."}`만 보내고 원인 체인은 로그로 남긴다.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::application::error::UseCaseError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    UseCase(#[from] UseCaseError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::UseCase(err) => match err {
                UseCaseError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                UseCaseError::NotFound(_) => StatusCode::NOT_FOUND,
                UseCaseError::Conflict(_) => StatusCode::CONFLICT,
                UseCaseError::Upstream { .. } => StatusCode::BAD_GATEWAY,
                UseCaseError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(format!("Invalid query string: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::UseCase(UseCaseError::Upstream { message, source })
            | ApiError::UseCase(UseCaseError::Storage { message, source }) => {
                error!(status = status.as_u16(), error = %format!("{source:#}"), "{message}");
            }
            other => {
                warn!(status = status.as_u16(), error = %other, "request rejected");
            }
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn use_case_errors_map_to_distinct_statuses() {
        let cases = [
            (UseCaseError::invalid("bad"), StatusCode::BAD_REQUEST),
            (
                UseCaseError::NotFound("gone".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                UseCaseError::Conflict("raced".to_string()),
                StatusCode::CONFLICT,
            ),
            (
                UseCaseError::upstream("llm down", anyhow::anyhow!("timeout")),
                StatusCode::BAD_GATEWAY,
            ),
            (
                UseCaseError::storage("db down", anyhow::anyhow!("locked")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[test]
    fn upstream_detail_is_not_exposed_to_clients() {
        let err = ApiError::from(UseCaseError::upstream(
            "Sentiment analysis failed",
            anyhow::anyhow!("OpenAI: 401 invalid key sk-..."),
        ));
        assert_eq!(err.to_string(), "Sentiment analysis failed");
    }
}
