//! Session repository over client storage
//!
//! The identity is a JSON document in the client's persisted area under
//! [`AuthConfig::session_key`](crate::application::config::AuthConfig).

use kernel::id::ClientId;
use platform::storage::{KeyValueStore, StorageKey, read_json, write_json};

use crate::domain::entity::user_record::UserRecord;
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;

/// [`SessionRepository`] backed by any [`KeyValueStore`]
#[derive(Debug, Clone)]
pub struct StoredSessionRepository<S> {
    store: S,
    key_name: String,
}

impl<S> StoredSessionRepository<S>
where
    S: KeyValueStore + Sync,
{
    pub fn new(store: S, key_name: impl Into<String>) -> Self {
        Self {
            store,
            key_name: key_name.into(),
        }
    }

    fn key(&self, client: ClientId) -> StorageKey {
        StorageKey::persistent(client, self.key_name.as_str())
    }
}

impl<S> SessionRepository for StoredSessionRepository<S>
where
    S: KeyValueStore + Sync,
{
    async fn find(&self, client: ClientId) -> AuthResult<Option<UserRecord>> {
        Ok(read_json(&self.store, &self.key(client)).await?)
    }

    async fn save(&self, client: ClientId, record: &UserRecord) -> AuthResult<()> {
        write_json(&self.store, &self.key(client), record).await?;
        Ok(())
    }

    async fn delete(&self, client: ClientId) -> AuthResult<()> {
        self.store.remove(&self.key(client)).await?;
        Ok(())
    }
}
