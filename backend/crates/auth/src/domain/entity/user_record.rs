//! User Record Entity
//!
//! The identity kept in a client's persisted area while signed in.
//! Its presence is what "authenticated" means.

use serde::{Deserialize, Serialize};

/// Fallback shown when no institution is recorded
pub const INSTITUTION_FALLBACK: &str = "Institution";

/// Fallback shown when no DID is recorded
pub const DID_FALLBACK: &str = "did:ethr:...";

/// Signed-in identity
///
/// Only `email` is required for a stored record to be accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub did: Option<String>,
}

impl UserRecord {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            email: email.into(),
            institution: String::new(),
            did: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_institution(mut self, institution: impl Into<String>) -> Self {
        self.institution = institution.into();
        self
    }

    pub fn with_did(mut self, did: impl Into<String>) -> Self {
        self.did = Some(did.into());
        self
    }

    /// Values for the navbar and sidebar, with blanks replaced by fallbacks
    pub fn display(&self) -> UserDisplay {
        UserDisplay {
            institution: non_empty(&self.institution).unwrap_or(INSTITUTION_FALLBACK).to_string(),
            email: self.email.clone(),
            did: self
                .did
                .as_deref()
                .and_then(non_empty)
                .unwrap_or(DID_FALLBACK)
                .to_string(),
            name: non_empty(&self.name).unwrap_or(self.email.as_str()).to_string(),
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.trim().is_empty()).then_some(value)
}

/// Hydrated user display state of a protected page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDisplay {
    pub institution: String,
    pub email: String,
    pub did: String,
    pub name: String,
}
