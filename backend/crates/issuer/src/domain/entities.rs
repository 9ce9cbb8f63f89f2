//! Domain Entities
//!
//! Core business entities for the issuer domain. Serialized field names
//! follow the keys the portal pages already read.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CredentialStatus, LedgerRefs, Polarity};

/// One dashboard statistic card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistic {
    pub title: String,
    pub value: String,
    pub change: String,
    pub polarity: Polarity,
}

impl Statistic {
    pub fn new(title: &str, value: &str, change: &str, polarity: Polarity) -> Self {
        Self {
            title: title.to_string(),
            value: value.to_string(),
            change: change.to_string(),
            polarity,
        }
    }
}

/// One row of the recent-activity table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    #[serde(rename = "student")]
    pub student_name: String,
    pub degree: String,
    pub date: NaiveDate,
    pub status: CredentialStatus,
    #[serde(rename = "txHash")]
    pub transaction_ref: String,
}

/// Issuance form as submitted by the page
///
/// `degree_title == "other"` means the free-text `custom_degree` applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CredentialForm {
    #[serde(rename = "studentDID", default)]
    pub student_did: String,
    #[serde(rename = "studentEmail", default)]
    pub student_email: String,
    #[serde(rename = "fullName", default)]
    pub full_name: String,
    #[serde(rename = "studentID", default)]
    pub student_id: String,
    #[serde(rename = "degreeTitle", default)]
    pub degree_title: String,
    #[serde(rename = "customDegree", default)]
    pub custom_degree: Option<String>,
    #[serde(default)]
    pub major: String,
    #[serde(default)]
    pub gpa: String,
    #[serde(rename = "graduationDate", default)]
    pub graduation_date: String,
    #[serde(default)]
    pub honors: String,
    #[serde(rename = "storeOnChain", default)]
    pub store_on_chain: bool,
    #[serde(rename = "pinToIPFS", default)]
    pub pin_to_ipfs: bool,
    #[serde(rename = "expirationDate", default)]
    pub expiration_date: String,
}

/// Validated form, handed from the form page to the preview page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialDraft {
    #[serde(rename = "studentDID")]
    pub student_did: String,
    #[serde(rename = "studentEmail", default)]
    pub student_email: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(rename = "studentID", default)]
    pub student_id: String,
    #[serde(rename = "degreeTitle")]
    pub degree_title: String,
    #[serde(default)]
    pub major: String,
    pub gpa: String,
    #[serde(rename = "graduationDate")]
    pub graduation_date: String,
    #[serde(default)]
    pub honors: String,
    #[serde(rename = "storeOnChain", default)]
    pub store_on_chain: bool,
    #[serde(rename = "pinToIPFS", default)]
    pub pin_to_ipfs: bool,
    #[serde(rename = "expirationDate", default)]
    pub expiration_date: String,
}

/// A credential after issuance. Never modified once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedCredentialRecord {
    #[serde(flatten)]
    pub draft: CredentialDraft,
    /// RFC 3339 with milliseconds, UTC
    #[serde(rename = "issuedAt")]
    pub issued_at: String,
    #[serde(rename = "txHash")]
    pub transaction_ref: String,
    #[serde(rename = "ipfsHash")]
    pub content_ref: String,
    pub status: CredentialStatus,
}

impl IssuedCredentialRecord {
    pub fn issue(draft: CredentialDraft, refs: LedgerRefs, issued_at: DateTime<Utc>) -> Self {
        Self {
            draft,
            issued_at: issued_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            transaction_ref: refs.transaction_ref,
            content_ref: refs.content_ref,
            status: CredentialStatus::Valid,
        }
    }
}
