//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::ClientId;

use crate::domain::entity::user_record::UserRecord;
use crate::error::AuthResult;

/// Session slot repository: at most one identity per client
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Stored identity; malformed data reads as `None`
    async fn find(&self, client: ClientId) -> AuthResult<Option<UserRecord>>;

    /// Store the identity, replacing any previous one
    async fn save(&self, client: ClientId, record: &UserRecord) -> AuthResult<()>;

    /// Remove the identity; a missing one is not an error
    async fn delete(&self, client: ClientId) -> AuthResult<()>;
}
