//! Simulated issuance backend
//!
//! Every stage just takes its time and succeeds; the references are random
//! hash-shaped strings.

use std::time::Duration;

use crate::domain::entities::CredentialDraft;
use crate::domain::repository::IssuanceBackend;
use crate::domain::services::mock_ledger_refs;
use crate::domain::value_objects::LedgerRefs;
use crate::domain::workflow::IssuanceStage;
use crate::error::IssuerResult;

#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    stage_delay: Duration,
}

impl SimulatedBackend {
    pub fn new(stage_delay: Duration) -> Self {
        Self { stage_delay }
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl IssuanceBackend for SimulatedBackend {
    async fn run_stage(&self, stage: IssuanceStage, draft: &CredentialDraft) -> IssuerResult<()> {
        tokio::time::sleep(self.stage_delay).await;
        tracing::debug!(stage = ?stage, subject = %draft.student_did, "Simulated stage done");
        Ok(())
    }

    async fn ledger_refs(&self, _draft: &CredentialDraft) -> IssuerResult<LedgerRefs> {
        Ok(mock_ledger_refs())
    }
}
