use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::auth::dto::ApiMessage;

/// Request-level failures. None of these ever take the process down.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing input; the message is shown to the user as is.
    #[error("{0}")]
    Validation(String),

    #[error("Email already registered")]
    DuplicateEmail,

    /// Deliberately does not say whether the email or the password was wrong.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email not found in our system")]
    EmailNotFound,

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::OK,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Storage(e) => {
                error!(error = %e, "storage failure");
                "An error occurred. Please try again.".to_string()
            }
            AppError::Internal(e) => {
                error!(error = %e, "internal failure");
                "An error occurred. Please try again.".to_string()
            }
            other => other.to_string(),
        };

        (self.status(), Json(ApiMessage::failure(message))).into_response()
    }
}
