//! Application Layer
//!
//! Use cases and application services.

pub mod auth_gate;
pub mod config;
pub mod session_store;
pub mod sign_in;

// Re-exports
pub use auth_gate::{AuthGate, active_page, logout_prompt, logout_target};
pub use config::AuthConfig;
pub use session_store::SessionStore;
pub use sign_in::{SignInInput, SignInUseCase};
