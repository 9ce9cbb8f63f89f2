//! Domain Value Objects
//!
//! Immutable value types for the issuer domain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a statistic's month-over-month change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

impl Polarity {
    /// CSS class of the change line; neutral has none
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            Polarity::Positive => Some("positive"),
            Polarity::Negative => Some("negative"),
            Polarity::Neutral => None,
        }
    }

    pub fn icon(&self) -> Option<&'static str> {
        match self {
            Polarity::Positive => Some("↑"),
            Polarity::Negative => Some("↓"),
            Polarity::Neutral => None,
        }
    }
}

/// Lifecycle status of an issued credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialStatus {
    Valid,
    Pending,
    Revoked,
}

impl CredentialStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialStatus::Valid => "Valid",
            CredentialStatus::Pending => "Pending",
            CredentialStatus::Revoked => "Revoked",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            CredentialStatus::Valid => "badge-success",
            CredentialStatus::Pending => "badge-warning",
            CredentialStatus::Revoked => "badge-danger",
        }
    }
}

impl fmt::Display for CredentialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mock ledger references produced by an issuance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRefs {
    /// Transaction reference (`0x...`)
    pub transaction_ref: String,
    /// Content reference (`Qm...`)
    pub content_ref: String,
}
