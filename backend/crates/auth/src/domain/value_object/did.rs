//! DID Value Object
//!
//! A decentralized identifier of the form `did:<method>:<identifier>`:
//! - method: one or more of `a-z 0-9`
//! - identifier: one or more of `A-Z a-z 0-9 . _ -` (no further colons)

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Message shown when a DID does not have the expected shape
pub const INVALID_DID_MESSAGE: &str = "Please enter a valid DID format";

const DID_SCHEME: &str = "did:";

/// Validated DID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(try_from = "String", into = "String")]
pub struct Did(String);

impl Did {
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if !is_valid_did(&value) {
            return Err(AppError::unprocessable(INVALID_DID_MESSAGE)
                .with_action("Use the form did:method:identifier"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Shape check without allocating
pub fn is_valid_did(value: &str) -> bool {
    let Some(rest) = value.strip_prefix(DID_SCHEME) else {
        return false;
    };
    let Some((method, identifier)) = rest.split_once(':') else {
        return false;
    };

    let method_ok = !method.is_empty()
        && method
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit());
    let identifier_ok = !identifier.is_empty()
        && identifier
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'));

    method_ok && identifier_ok
}

impl FromStr for Did {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Did::new(s)
    }
}

impl TryFrom<String> for Did {
    type Error = AppError;

    fn try_from(value: String) -> AppResult<Self> {
        Did::new(value)
    }
}

impl From<Did> for String {
    fn from(did: Did) -> Self {
        did.0
    }
}

impl AsRef<str> for Did {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
