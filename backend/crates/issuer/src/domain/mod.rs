//! Domain Layer
//!
//! Contains entities, value objects, the issuance workflow, domain services,
//! and repository traits.

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
pub mod workflow;

// Re-exports
pub use entities::{ActivityRecord, CredentialDraft, CredentialForm, IssuedCredentialRecord, Statistic};
pub use repository::{CredentialRepository, DashboardRepository, DraftRepository, IssuanceBackend};
pub use value_objects::{CredentialStatus, LedgerRefs, Polarity};
pub use workflow::{IssuanceStage, WorkflowEvent, WorkflowState};
