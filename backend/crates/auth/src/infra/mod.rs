//! Infrastructure Layer
//!
//! Repository implementations over the client key/value store.

pub mod storage;

pub use storage::StoredSessionRepository;
