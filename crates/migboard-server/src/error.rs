//! Application-wide error types using thiserror.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use migboard_common::MigboardError;
use serde_json::json;

/// Startup and lifecycle error type.
#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    /// Configuration or data error.
    #[error("Configuration error: {0}")]
    Config(#[from] MigboardError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the server application.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors returned from request handlers.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// The multipart upload had no file field.
    #[error("missing upload field '{0}'")]
    MissingUpload(&'static str),

    /// The request was malformed.
    #[error("{0}")]
    BadRequest(String),

    /// The requested resource does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// A domain operation failed.
    #[error(transparent)]
    Domain(#[from] MigboardError),

    /// A blocking worker panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingUpload(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Domain(MigboardError::EmptyTable) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Domain(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, %status, "Request rejected");
        }
        (
            status,
            Json(json!({ "status": "error", "message": self.to_string() })),
        )
            .into_response()
    }
}
