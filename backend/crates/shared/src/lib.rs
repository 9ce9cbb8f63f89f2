//! Shared Kernel - Vocabulary shared by every portal crate
//!
//! This crate holds the few things all other crates agree on:
//! - The unified error type and its classification
//! - Typed identifiers (client scopes, confirmation prompts)
//!
//! Anything page- or workflow-specific belongs in `auth` or `issuer`.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
