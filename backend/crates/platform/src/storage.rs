//! Client Key/Value Storage
//!
//! Server-side stand-in for the browser's storage: each client owns a
//! persisted area (survives page navigation and logout of other data) and a
//! transient area (hand-offs between two pages). Values are JSON text.
//!
//! The store is injected into every component that needs it; tests use
//! [`MemoryStore`] directly.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use kernel::id::ClientId;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Storage area within one client's scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageArea {
    /// Lives as long as the process (browser `localStorage`)
    Persistent,
    /// Cleared once the hand-off it carries is consumed (browser `sessionStorage`)
    Transient,
}

impl StorageArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageArea::Persistent => "persistent",
            StorageArea::Transient => "transient",
        }
    }
}

/// Fully qualified storage key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey {
    client: ClientId,
    area: StorageArea,
    name: String,
}

impl StorageKey {
    pub fn new(client: ClientId, area: StorageArea, name: impl Into<String>) -> Self {
        Self {
            client,
            area,
            name: name.into(),
        }
    }

    pub fn persistent(client: ClientId, name: impl Into<String>) -> Self {
        Self::new(client, StorageArea::Persistent, name)
    }

    pub fn transient(client: ClientId, name: impl Into<String>) -> Self {
        Self::new(client, StorageArea::Transient, name)
    }

    pub fn client(&self) -> ClientId {
        self.client
    }

    pub fn area(&self) -> StorageArea {
        self.area
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.client, self.area.as_str(), self.name)
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to encode value for {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Key/value backend
#[trait_variant::make(KeyValueStore: Send)]
pub trait LocalKeyValueStore {
    /// Raw value, `None` if the key was never set or was removed
    async fn get(&self, key: &StorageKey) -> StorageResult<Option<String>>;

    /// Set a value, replacing any previous one (last write wins)
    async fn set(&self, key: &StorageKey, value: String) -> StorageResult<()>;

    /// Remove a value; removing a missing key is not an error
    async fn remove(&self, key: &StorageKey) -> StorageResult<()>;
}

#[derive(Debug)]
struct Entry {
    value: String,
    written_at: Instant,
}

/// In-memory backend shared by all clients of one process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<StorageKey, Entry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove transient values not written for `max_idle`; the persisted
    /// area is never expired. Returns how many went.
    pub async fn evict_transient(&self, max_idle: Duration) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, entry| {
            key.area == StorageArea::Persistent || entry.written_at.elapsed() < max_idle
        });
        before - entries.len()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &StorageKey) -> StorageResult<Option<String>> {
        Ok(self
            .entries
            .read()
            .await
            .get(key)
            .map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &StorageKey, value: String) -> StorageResult<()> {
        let entry = Entry {
            value,
            written_at: Instant::now(),
        };
        self.entries.write().await.insert(key.clone(), entry);
        Ok(())
    }

    async fn remove(&self, key: &StorageKey) -> StorageResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// Read and decode a JSON value.
///
/// Malformed data is logged and reported as absent; it never fails the
/// caller. Backend failures are still returned as errors.
pub async fn read_json<S, T>(store: &S, key: &StorageKey) -> StorageResult<Option<T>>
where
    S: KeyValueStore + Sync,
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Discarding malformed stored value");
            Ok(None)
        }
    }
}

/// Encode a value as JSON and store it
pub async fn write_json<S, T>(store: &S, key: &StorageKey, value: &T) -> StorageResult<()>
where
    S: KeyValueStore + Sync,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, raw).await
}
