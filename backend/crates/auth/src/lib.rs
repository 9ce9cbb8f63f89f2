//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Session Store, Auth Gate, sign-in use case
//! - `infra/` - Repository over the client key/value store
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Mock sign-in storing the issuer identity for the client
//! - Redirect-to-login gate for every protected route
//! - Logout with a confirmation prompt, returning to the portal root
//!   wherever the portal is mounted
//! - Page hydration (user display values and the active sidebar entry)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::storage::StoredSessionRepository;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::user_record::*;
    pub use crate::domain::value_object::{did::*, email::*};
    pub use crate::presentation::dto::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
