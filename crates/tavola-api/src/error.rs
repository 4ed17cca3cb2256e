use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use tavola_engine::EngineError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Thread not found: {0}")]
    ThreadNotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::ThreadNotFound(_) => {
                (StatusCode::NOT_FOUND, "not_found", self.to_string())
            }
            ApiError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, "bad_request", self.to_string())
            }
            ApiError::Engine(ref e) => {
                tracing::error!(kind = e.kind(), error = %e, "turn failed");
                let status = match e {
                    EngineError::Input(_) => StatusCode::BAD_REQUEST,
                    EngineError::Auth(_) => StatusCode::UNAUTHORIZED,
                    EngineError::Provider(_) => StatusCode::BAD_GATEWAY,
                    EngineError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                };
                (status, e.kind(), e.user_message().to_string())
            }
            ApiError::Internal => {
                tracing::error!("internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "kind": kind,
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
