// src/error.rs
use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;
use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    DuplicateCode(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Upload(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("file store error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn duplicate_code(code: &str) -> Self {
        AppError::DuplicateCode(format!("Product code '{code}' already exists"))
    }

    pub fn upload(msg: impl Into<String>) -> Self {
        AppError::Upload(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::DuplicateCode(_) | AppError::Upload(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Database error occurred".to_string(),
            AppError::Io(_) => "Failed to store uploaded file".to_string(),
            other => other.to_string(),
        }
    }

    fn into_keyed_response(self, key: &'static str) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(json!({ key: self.client_message() }));
        (status, body).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_keyed_response("error")
    }
}

/// Renders an [`AppError`] as `{"message": ...}`; the update endpoint has
/// always answered with that key.
#[derive(Debug)]
pub struct MessageError(pub AppError);

impl From<AppError> for MessageError {
    fn from(err: AppError) -> Self {
        MessageError(err)
    }
}

impl IntoResponse for MessageError {
    fn into_response(self) -> Response {
        self.0.into_keyed_response("message")
    }
}
