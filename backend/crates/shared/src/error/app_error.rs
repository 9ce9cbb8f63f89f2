//! Application Error
//!
//! [`AppError`] is what every portal crate's error eventually becomes at the
//! HTTP boundary. Its message is shown to the user as an error notification,
//! so it must never carry internal details; those go in `source`.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

type Text = Cow<'static, str>;
type Source = Box<dyn Error + Send + Sync + 'static>;

/// Unified portal error.
///
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::unprocessable("Please enter a valid DID format")
///     .with_action("Use the form did:method:identifier");
/// assert_eq!(err.kind(), ErrorKind::UnprocessableEntity);
/// assert_eq!(err.status_code(), 422);
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Text,
    /// Next step for the user, rendered under the message
    action: Option<Text>,
    /// Logged, never rendered
    source: Option<Source>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<Text>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
            source: None,
        }
    }

    pub fn bad_request(message: impl Into<Text>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn not_found(message: impl Into<Text>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Form input the user has to correct
    pub fn unprocessable(message: impl Into<Text>) -> Self {
        Self::new(ErrorKind::UnprocessableEntity, message)
    }

    pub fn internal(message: impl Into<Text>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    pub fn with_action(self, action: impl Into<Text>) -> Self {
        Self {
            action: Some(action.into()),
            ..self
        }
    }

    /// Keep the underlying error for the logs.
    ///
    /// ```rust
    /// use kernel::error::app_error::{AppError, AppResult};
    ///
    /// fn parse_record(raw: &str) -> AppResult<serde_json::Value> {
    ///     serde_json::from_str(raw)
    ///         .map_err(|e| AppError::internal("Stored record is unreadable").with_source(e))
    /// }
    /// assert!(parse_record("{").is_err());
    /// ```
    pub fn with_source<E>(self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            source: Some(Box::new(source)),
            ..self
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }

    pub fn is_client_error(&self) -> bool {
        self.kind.is_client_error()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("action", &self.action)
            .field("source", &self.source.as_ref().map(|s| s.to_string()))
            .finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.action {
            Some(action) => write!(f, "[{}] {} ({})", self.kind, self.message, action),
            None => write!(f, "[{}] {}", self.kind, self.message),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.source {
            Some(source) => Some(source.as_ref()),
            None => None,
        }
    }
}

/// Turn a missing value into a 404
pub trait OptionExt<T> {
    fn ok_or_not_found(self, message: impl Into<Text>) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, message: impl Into<Text>) -> AppResult<T> {
        self.ok_or_else(|| AppError::not_found(message))
    }
}
