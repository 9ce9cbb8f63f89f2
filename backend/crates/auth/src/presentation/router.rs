//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use platform::notify::NotifierRegistry;
use platform::storage::MemoryStore;

use crate::application::config::AuthConfig;
use crate::domain::repository::SessionRepository;
use crate::infra::storage::StoredSessionRepository;
use crate::presentation::handlers::{self, AuthAppState};

type MemorySessions = StoredSessionRepository<MemoryStore>;

/// Create the Auth router over the in-memory client store
pub fn auth_router(store: MemoryStore, config: AuthConfig, notifiers: NotifierRegistry) -> Router {
    let repo = StoredSessionRepository::new(store, config.session_key.clone());
    auth_router_generic::<MemorySessions>(repo, config, notifiers)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig, notifiers: NotifierRegistry) -> Router
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
        notifiers,
    };

    Router::new()
        .route("/signin", post(handlers::sign_in::<R>))
        .route("/status", get(handlers::session_status::<R>))
        .route("/page", get(handlers::page_context::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .with_state(state)
}
