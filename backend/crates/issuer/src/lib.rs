//! Issuer Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, the issuance workflow state machine
//! - `application/` - Dashboard Presenter, Issuance Workflow steps
//! - `infra/` - Client storage repository, simulated issuance backend
//! - `presentation/` - HTTP handlers, DTOs, HTML fragments, router
//!
//! ## Flow
//! - The dashboard shows fixed statistics and recent activity, with refresh
//!   and JSON export
//! - Issue form -> preview -> confirm, with the draft handed between pages
//!   through the client's transient storage
//! - Confirmed issuance runs four announced stages, appends the record to
//!   the client's issued list and sends the page to the result view

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::IssuerConfig;
pub use error::{IssuerError, IssuerResult};
pub use infra::simulated::SimulatedBackend;
pub use infra::storage::StoredIssuerRepository;
pub use presentation::router::issuer_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

#[cfg(test)]
mod tests;
