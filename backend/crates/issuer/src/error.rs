//! Issuer Error Types
//!
//! This module provides issuer-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::storage::StorageError;
use thiserror::Error;

use crate::domain::workflow::InvalidTransition;

/// Issuer-specific result type alias
pub type IssuerResult<T> = Result<T, IssuerError>;

/// Issuer-specific error variants
///
/// These are domain-specific errors that map to appropriate HTTP status codes
/// and can be converted to `AppError` for unified error handling.
#[derive(Debug, Error)]
pub enum IssuerError {
    /// Submitted form rejected (message is the notification text)
    #[error("{0}")]
    Validation(String),

    /// Issuance stage failed
    #[error("Issuance backend error: {0}")]
    Backend(String),

    /// Workflow step out of order
    #[error("Workflow error: {0}")]
    Workflow(#[from] InvalidTransition),

    /// Client storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Export could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IssuerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            IssuerError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            IssuerError::Backend(_) => StatusCode::SERVICE_UNAVAILABLE,
            IssuerError::Workflow(_) => StatusCode::CONFLICT,
            IssuerError::Storage(_) | IssuerError::Serialization(_) | IssuerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            IssuerError::Validation(_) => ErrorKind::UnprocessableEntity,
            IssuerError::Backend(_) => ErrorKind::ServiceUnavailable,
            IssuerError::Workflow(_) => ErrorKind::Conflict,
            IssuerError::Storage(_) | IssuerError::Serialization(_) | IssuerError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            IssuerError::Storage(e) => {
                tracing::error!(error = %e, "Issuer storage error");
            }
            IssuerError::Serialization(e) => {
                tracing::error!(error = %e, "Issuer serialization error");
            }
            IssuerError::Internal(msg) => {
                tracing::error!(message = %msg, "Issuer internal error");
            }
            IssuerError::Backend(msg) => {
                tracing::warn!(message = %msg, "Issuance backend failure");
            }
            IssuerError::Workflow(e) => {
                tracing::warn!(error = %e, "Issuance workflow out of order");
            }
            IssuerError::Validation(_) => {
                tracing::debug!(error = %self, "Issuer validation error");
            }
        }
    }
}

impl From<IssuerError> for AppError {
    fn from(err: IssuerError) -> Self {
        let kind = err.kind();
        match err {
            IssuerError::Validation(message) => AppError::new(kind, message),
            IssuerError::Backend(_) => {
                AppError::new(kind, "Credential issuance is unavailable").with_action("Try again later")
            }
            // Internal details stay in the logs
            _ if kind.is_server_error() => AppError::new(kind, "Something went wrong"),
            other => AppError::new(kind, other.to_string()),
        }
    }
}

impl IntoResponse for IssuerError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
