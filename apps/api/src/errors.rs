use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders as a flat `{"error": "<message>"}` body, which is
/// what the upload form reads.
#[derive(Debug, Error)]
pub enum AppError {
    /// Client-side problem with the upload. The message is returned verbatim.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Multipart(#[from] MultipartError),

    /// Plain-text upload that could not be decoded.
    #[error("{0}")]
    Extraction(String),

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Multipart(e) => e.status(),
            AppError::Extraction(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Multipart(e) => {
                tracing::warn!("Rejected multipart body: {e}");
                e.body_text()
            }
            AppError::Extraction(msg) => {
                tracing::error!("Extraction error: {msg}");
                msg.clone()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                e.to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
