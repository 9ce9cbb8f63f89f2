//! Infrastructure Layer
//!
//! Repository implementations over the client key/value store, the fixed
//! dashboard data, and the simulated issuance backend.

pub mod fixtures;
pub mod simulated;
pub mod storage;

pub use simulated::SimulatedBackend;
pub use storage::StoredIssuerRepository;
