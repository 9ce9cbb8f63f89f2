//! Presentation Layer
//!
//! HTTP handlers, DTOs, HTML fragments, and the router.

pub mod dto;
pub mod handlers;
pub mod router;
pub mod view;

pub use handlers::IssuerAppState;
pub use router::{issuer_router, issuer_router_generic};
