//! Issuer repository over client storage
//!
//! - handoff draft: transient area, single slot
//! - issued credentials: persisted area, JSON array appended to
//! - dashboard figures: fixed data from [`fixtures`](super::fixtures)

use kernel::id::ClientId;
use platform::storage::{KeyValueStore, StorageKey, read_json, write_json};

use crate::domain::entities::{
    ActivityRecord, CredentialDraft, IssuedCredentialRecord, Statistic,
};
use crate::domain::repository::{CredentialRepository, DashboardRepository, DraftRepository};
use crate::error::IssuerResult;
use crate::infra::fixtures::{sample_activity, sample_statistics};

#[derive(Debug, Clone)]
pub struct StoredIssuerRepository<S> {
    store: S,
    draft_key: String,
    issued_key: String,
}

impl<S> StoredIssuerRepository<S>
where
    S: KeyValueStore + Sync,
{
    pub fn new(store: S, draft_key: impl Into<String>, issued_key: impl Into<String>) -> Self {
        Self {
            store,
            draft_key: draft_key.into(),
            issued_key: issued_key.into(),
        }
    }

    fn draft_slot(&self, client: ClientId) -> StorageKey {
        StorageKey::transient(client, self.draft_key.as_str())
    }

    fn issued_slot(&self, client: ClientId) -> StorageKey {
        StorageKey::persistent(client, self.issued_key.as_str())
    }
}

impl<S> DashboardRepository for StoredIssuerRepository<S>
where
    S: KeyValueStore + Sync,
{
    async fn statistics(&self) -> IssuerResult<Vec<Statistic>> {
        Ok(sample_statistics())
    }

    async fn recent_activity(&self) -> IssuerResult<Vec<ActivityRecord>> {
        Ok(sample_activity())
    }
}

impl<S> DraftRepository for StoredIssuerRepository<S>
where
    S: KeyValueStore + Sync,
{
    async fn load_draft(&self, client: ClientId) -> IssuerResult<Option<CredentialDraft>> {
        Ok(read_json(&self.store, &self.draft_slot(client)).await?)
    }

    async fn save_draft(&self, client: ClientId, draft: &CredentialDraft) -> IssuerResult<()> {
        write_json(&self.store, &self.draft_slot(client), draft).await?;
        Ok(())
    }

    async fn clear_draft(&self, client: ClientId) -> IssuerResult<()> {
        self.store.remove(&self.draft_slot(client)).await?;
        Ok(())
    }
}

impl<S> CredentialRepository for StoredIssuerRepository<S>
where
    S: KeyValueStore + Sync,
{
    async fn append(
        &self,
        client: ClientId,
        record: &IssuedCredentialRecord,
    ) -> IssuerResult<usize> {
        let key = self.issued_slot(client);
        // An unreadable history is never overwritten
        let mut records: Vec<IssuedCredentialRecord> = match self.store.get(&key).await? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        records.push(record.clone());
        write_json(&self.store, &key, &records).await?;
        Ok(records.len())
    }

    async fn list(&self, client: ClientId) -> IssuerResult<Vec<IssuedCredentialRecord>> {
        Ok(read_json(&self.store, &self.issued_slot(client))
            .await?
            .unwrap_or_default())
    }
}
