//! Error handling for the application
//!
//! The quote calculator itself has no error path; everything here belongs to
//! the surrounding transport and mail layers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Mail delivery failed: {0}")]
    Mail(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::Mail(e) => {
                tracing::error!("Mail delivery failed: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Die Anfrage konnte nicht gesendet werden.".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };

        (status, Json(json!({ "ok": false, "error": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
