//! Error classification
//!
//! Only the statuses the portal actually produces are listed; each kind maps
//! to exactly one HTTP status.

use serde::Serialize;

/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::UnprocessableEntity.status_code(), 422);
/// assert_eq!(ErrorKind::UnprocessableEntity.as_str(), "Unprocessable Entity");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Malformed request body or query
    BadRequest,
    /// Unknown prompt or notification
    NotFound,
    /// Workflow step taken out of order
    Conflict,
    /// Form data failed validation
    UnprocessableEntity,
    InternalServerError,
    /// The issuance backend is unavailable
    ServiceUnavailable,
}

impl ErrorKind {
    const fn status(&self) -> (u16, &'static str) {
        match self {
            ErrorKind::BadRequest => (400, "Bad Request"),
            ErrorKind::NotFound => (404, "Not Found"),
            ErrorKind::Conflict => (409, "Conflict"),
            ErrorKind::UnprocessableEntity => (422, "Unprocessable Entity"),
            ErrorKind::InternalServerError => (500, "Internal Server Error"),
            ErrorKind::ServiceUnavailable => (503, "Service Unavailable"),
        }
    }

    pub const fn status_code(&self) -> u16 {
        self.status().0
    }

    /// Reason phrase of the status
    pub const fn as_str(&self) -> &'static str {
        self.status().1
    }

    /// 5xx: always logged at error level
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    pub const fn is_client_error(&self) -> bool {
        matches!(self.status_code(), 400..=499)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
