//! Platform Crate - Technical Infrastructure
//!
//! This crate provides the technical foundations every portal page uses:
//! - Cryptographic utilities (HMAC-SHA256 signed tokens, Base64)
//! - Cookie management
//! - Client scope (which browser client a request belongs to)
//! - Key/value storage with a persisted and a transient area per client
//! - Navigation targets handed back to the page
//! - Notification Service (transient messages and confirmation prompts)

pub mod client_scope;
pub mod cookie;
pub mod crypto;
pub mod navigation;
pub mod notify;
pub mod storage;
