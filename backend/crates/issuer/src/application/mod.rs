//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Contains the Dashboard Presenter and the Issuance Workflow steps.

pub mod config;
pub mod dashboard;
pub mod issuance;

pub use config::IssuerConfig;
pub use dashboard::{ActivityRowView, DashboardPresenter, DashboardView, ExportFile, StatCardView};
pub use issuance::{FormDefaults, IssuanceOutcome, IssuanceWorkflow, ResultPageQuery};
