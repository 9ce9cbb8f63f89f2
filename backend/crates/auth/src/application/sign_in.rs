//! Sign In Use Case
//!
//! Mock login: any well-formed email is accepted and becomes the client's
//! identity. There is no credential check.

use std::sync::Arc;

use kernel::id::ClientId;

use crate::domain::entity::user_record::UserRecord;
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::{did::Did, email::Email};
use crate::error::AuthResult;

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub name: Option<String>,
    pub institution: Option<String>,
    /// Institutional DID; checked only when present
    pub did: Option<String>,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: SessionRepository + Send + Sync + 'static,
{
    session_repo: Arc<R>,
}

impl<R> SignInUseCase<R>
where
    R: SessionRepository + Send + Sync + 'static,
{
    pub fn new(session_repo: Arc<R>) -> Self {
        Self { session_repo }
    }

    pub async fn execute(&self, client: ClientId, input: SignInInput) -> AuthResult<UserRecord> {
        let email = Email::new(input.email)?;

        let did = match input.did.map(|d| d.trim().to_string()) {
            Some(d) if !d.is_empty() => Some(Did::new(d)?),
            _ => None,
        };

        let mut record = UserRecord::new(email.into_inner());
        if let Some(name) = input.name {
            record = record.with_name(name.trim());
        }
        if let Some(institution) = input.institution {
            record = record.with_institution(institution.trim());
        }
        if let Some(did) = did {
            record = record.with_did(did);
        }

        self.session_repo.save(client, &record).await?;

        tracing::info!(
            client_id = %client,
            email = %record.email,
            has_did = record.did.is_some(),
            "Signed in"
        );

        Ok(record)
    }
}
