//! Issuance Workflow
//!
//! ```text
//! Drafting --submit(valid)--> Previewing --confirm--> Issuing(4 stages) --> Issued
//!    ^  |                         |  |
//!    |  +--submit(invalid)--+     |  +--handoff missing--> Aborted
//!    +----------------------+-----+ back
//! ```
//!
//! `Issued` and `Aborted` are terminal.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use auth::models::is_valid_did;

use crate::domain::entities::{CredentialDraft, CredentialForm};

/// Degree select value that switches to the free-text field
pub const CUSTOM_DEGREE_VALUE: &str = "other";

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill all required fields";
pub const INVALID_DID_MESSAGE: &str = auth::models::INVALID_DID_MESSAGE;

/// Simulated steps of an issuance, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssuanceStage {
    GenerateDocument,
    Sign,
    UploadContent,
    WriteLedger,
}

impl IssuanceStage {
    pub const ALL: [IssuanceStage; 4] = [
        IssuanceStage::GenerateDocument,
        IssuanceStage::Sign,
        IssuanceStage::UploadContent,
        IssuanceStage::WriteLedger,
    ];

    /// Info notification shown when the stage starts
    pub fn announcement(&self) -> &'static str {
        match self {
            IssuanceStage::GenerateDocument => "Generating credential JSON...",
            IssuanceStage::Sign => "Signing with institutional DID...",
            IssuanceStage::UploadContent => "Uploading to IPFS...",
            IssuanceStage::WriteLedger => "Writing to Polygon blockchain...",
        }
    }

    pub fn next(&self) -> Option<IssuanceStage> {
        match self {
            IssuanceStage::GenerateDocument => Some(IssuanceStage::Sign),
            IssuanceStage::Sign => Some(IssuanceStage::UploadContent),
            IssuanceStage::UploadContent => Some(IssuanceStage::WriteLedger),
            IssuanceStage::WriteLedger => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Drafting,
    Previewing,
    Issuing(IssuanceStage),
    Issued,
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowEvent {
    /// Form passed validation and the handoff was written
    Submitted,
    /// Form failed validation
    Rejected,
    /// Preview or confirm found no handoff
    HandoffMissing,
    /// "Back" from the preview
    Back,
    /// User confirmed the preview
    Confirmed,
    /// The current stage finished
    StageCompleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: WorkflowState,
    pub event: WorkflowEvent,
}

impl fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} does not accept {:?}", self.from, self.event)
    }
}

impl std::error::Error for InvalidTransition {}

impl WorkflowState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkflowState::Issued | WorkflowState::Aborted)
    }

    pub fn advance(self, event: WorkflowEvent) -> Result<WorkflowState, InvalidTransition> {
        use WorkflowEvent as E;
        use WorkflowState as S;

        let next = match (self, event) {
            (S::Drafting, E::Submitted) => S::Previewing,
            (S::Drafting, E::Rejected) => S::Drafting,
            (S::Previewing, E::Back) => S::Drafting,
            (S::Previewing, E::HandoffMissing) => S::Aborted,
            (S::Previewing, E::Confirmed) => S::Issuing(IssuanceStage::GenerateDocument),
            (S::Issuing(stage), E::StageCompleted) => match stage.next() {
                Some(next) => S::Issuing(next),
                None => S::Issued,
            },
            (from, event) => return Err(InvalidTransition { from, event }),
        };
        Ok(next)
    }
}

/// Why a submitted form stays in drafting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftRejection {
    MissingRequired,
    InvalidDid,
    InvalidDate { field: &'static str },
}

impl DraftRejection {
    /// Text of the error notification
    pub fn message(&self) -> String {
        match self {
            DraftRejection::MissingRequired => MISSING_FIELDS_MESSAGE.to_string(),
            DraftRejection::InvalidDid => INVALID_DID_MESSAGE.to_string(),
            DraftRejection::InvalidDate { field } => {
                format!("Please enter a valid {} (YYYY-MM-DD)", field)
            }
        }
    }
}

fn is_iso_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// Validate a submitted form and turn it into the handoff draft
///
/// Text fields are trimmed; a blank required field counts as missing.
pub fn validate_form(form: CredentialForm) -> Result<CredentialDraft, DraftRejection> {
    let degree_title = if form.degree_title.trim() == CUSTOM_DEGREE_VALUE {
        form.custom_degree.unwrap_or_default()
    } else {
        form.degree_title
    };

    let draft = CredentialDraft {
        student_did: form.student_did.trim().to_string(),
        student_email: form.student_email.trim().to_string(),
        full_name: form.full_name.trim().to_string(),
        student_id: form.student_id.trim().to_string(),
        degree_title: degree_title.trim().to_string(),
        major: form.major.trim().to_string(),
        gpa: form.gpa.trim().to_string(),
        graduation_date: form.graduation_date.trim().to_string(),
        honors: form.honors.trim().to_string(),
        store_on_chain: form.store_on_chain,
        pin_to_ipfs: form.pin_to_ipfs,
        expiration_date: form.expiration_date.trim().to_string(),
    };

    let required = [
        &draft.student_did,
        &draft.full_name,
        &draft.degree_title,
        &draft.gpa,
        &draft.graduation_date,
    ];
    if required.iter().any(|value| value.is_empty()) {
        return Err(DraftRejection::MissingRequired);
    }

    if !is_valid_did(&draft.student_did) {
        return Err(DraftRejection::InvalidDid);
    }

    if !is_iso_date(&draft.graduation_date) {
        return Err(DraftRejection::InvalidDate {
            field: "graduation date",
        });
    }
    if !draft.expiration_date.is_empty() && !is_iso_date(&draft.expiration_date) {
        return Err(DraftRejection::InvalidDate {
            field: "expiration date",
        });
    }

    Ok(draft)
}
