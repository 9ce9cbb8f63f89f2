//! Issuer Router
//!
//! Every route is behind the auth gate: a client without a session is sent
//! to the login page before any handler runs.

use auth::StoredSessionRepository;
use auth::domain::repository::SessionRepository;
use auth::middleware::{AuthMiddlewareState, require_auth_session};
use axum::body::Body;
use axum::http::Request;
use axum::middleware::{self, Next};
use axum::{
    Router,
    routing::{get, post},
};
use platform::notify::NotifierRegistry;
use platform::storage::MemoryStore;
use std::sync::Arc;

use crate::application::config::IssuerConfig;
use crate::domain::repository::{
    CredentialRepository, DashboardRepository, DraftRepository, IssuanceBackend,
};
use crate::infra::simulated::SimulatedBackend;
use crate::infra::storage::StoredIssuerRepository;
use crate::presentation::handlers::{self, IssuerAppState};

type MemoryIssuer = StoredIssuerRepository<MemoryStore>;

/// Create the Issuer router over the in-memory client store and the
/// simulated issuance backend
pub fn issuer_router(
    store: MemoryStore,
    config: IssuerConfig,
    notifiers: NotifierRegistry,
    auth: AuthMiddlewareState<StoredSessionRepository<MemoryStore>>,
) -> Router {
    let repo = StoredIssuerRepository::new(
        store,
        config.draft_key.clone(),
        config.issued_key.clone(),
    );
    let backend = SimulatedBackend::new(config.stage_delay);
    issuer_router_generic::<MemoryIssuer, SimulatedBackend, _>(repo, backend, config, notifiers, auth)
}

/// Create a generic Issuer router for any repository and backend
pub fn issuer_router_generic<R, B, A>(
    repo: R,
    backend: B,
    config: IssuerConfig,
    notifiers: NotifierRegistry,
    auth: AuthMiddlewareState<A>,
) -> Router
where
    R: DashboardRepository + DraftRepository + CredentialRepository + Clone + Send + Sync + 'static,
    B: IssuanceBackend + Clone + Send + Sync + 'static,
    A: SessionRepository + Clone + Send + Sync + 'static,
{
    let state = IssuerAppState {
        repo: Arc::new(repo),
        backend: Arc::new(backend),
        config: Arc::new(config),
        notifiers,
    };

    Router::new()
        .route("/dashboard", get(handlers::get_dashboard::<R, B>))
        .route("/dashboard/refresh", post(handlers::refresh_dashboard::<R, B>))
        .route("/dashboard/export", get(handlers::export_dashboard::<R, B>))
        .route("/issue/form", get(handlers::issue_form::<R, B>))
        .route("/issue/submit", post(handlers::submit_issue::<R, B>))
        .route("/issue/preview", get(handlers::preview_issue::<R, B>))
        .route("/issue/back", post(handlers::back_to_form::<R, B>))
        .route("/issue/confirm", post(handlers::confirm_issue::<R, B>))
        .route("/credentials", get(handlers::list_credentials::<R, B>))
        .route_layer(middleware::from_fn(move |req: Request<Body>, next: Next| {
            require_auth_session(auth.clone(), req, next)
        }))
        .with_state(state)
}
