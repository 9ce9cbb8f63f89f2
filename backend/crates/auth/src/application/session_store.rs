//! Session Store
//!
//! Reads and writes the signed-in identity of a client. Reading never
//! fails: missing, malformed or unreadable data all mean "not signed in".

use std::sync::Arc;

use kernel::id::ClientId;

use crate::domain::entity::user_record::UserRecord;
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;

pub struct SessionStore<R>
where
    R: SessionRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
}

impl<R> Clone for SessionStore<R>
where
    R: SessionRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<R> SessionStore<R>
where
    R: SessionRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Current identity, or `None`
    pub async fn get_current(&self, client: ClientId) -> Option<UserRecord> {
        match self.repo.find(client).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(client_id = %client, error = %e, "Failed to read session; treating as signed out");
                None
            }
        }
    }

    pub async fn is_authenticated(&self, client: ClientId) -> bool {
        self.get_current(client).await.is_some()
    }

    pub async fn save(&self, client: ClientId, record: &UserRecord) -> AuthResult<()> {
        self.repo.save(client, record).await?;
        tracing::info!(client_id = %client, email = %record.email, "Session stored");
        Ok(())
    }

    pub async fn clear(&self, client: ClientId) -> AuthResult<()> {
        self.repo.delete(client).await?;
        tracing::info!(client_id = %client, "Session cleared");
        Ok(())
    }
}
