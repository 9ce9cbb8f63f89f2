//! Repository Traits
//!
//! Interfaces for data access and the issuance backend. Implementations are
//! in the infrastructure layer.

use kernel::id::ClientId;

use crate::domain::entities::{
    ActivityRecord, CredentialDraft, IssuedCredentialRecord, Statistic,
};
use crate::domain::value_objects::LedgerRefs;
use crate::domain::workflow::IssuanceStage;
use crate::error::IssuerResult;

/// Dashboard data source
#[trait_variant::make(DashboardRepository: Send)]
pub trait LocalDashboardRepository {
    async fn statistics(&self) -> IssuerResult<Vec<Statistic>>;

    /// Most recent issuances, newest first
    async fn recent_activity(&self) -> IssuerResult<Vec<ActivityRecord>>;
}

/// Single-slot handoff between the form and the preview page
#[trait_variant::make(DraftRepository: Send)]
pub trait LocalDraftRepository {
    /// Stored draft; malformed data reads as `None`
    async fn load_draft(&self, client: ClientId) -> IssuerResult<Option<CredentialDraft>>;

    /// Store the draft, replacing any previous one
    async fn save_draft(&self, client: ClientId, draft: &CredentialDraft) -> IssuerResult<()>;

    async fn clear_draft(&self, client: ClientId) -> IssuerResult<()>;
}

/// Append-only collection of issued credentials
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Append a record; returns the collection size afterwards
    async fn append(&self, client: ClientId, record: &IssuedCredentialRecord)
    -> IssuerResult<usize>;

    /// All records in issuance order
    async fn list(&self, client: ClientId) -> IssuerResult<Vec<IssuedCredentialRecord>>;
}

/// Where the issuance stages actually happen
#[trait_variant::make(IssuanceBackend: Send)]
pub trait LocalIssuanceBackend {
    /// Perform one stage for the draft
    async fn run_stage(&self, stage: IssuanceStage, draft: &CredentialDraft) -> IssuerResult<()>;

    /// References of the finished issuance
    async fn ledger_refs(&self, draft: &CredentialDraft) -> IssuerResult<LedgerRefs>;
}
