//! Issuer Portal server
//!
//! Assembles the auth, issuer and notification routers behind the client
//! scope middleware. Everything a client stores lives in one shared
//! in-memory store.

pub mod config;
pub mod notifications;

use std::sync::Arc;
use std::time::Duration;

use auth::StoredSessionRepository;
use auth::auth_router;
use auth::middleware::AuthMiddlewareState;
use axum::Router;
use axum::middleware::from_fn_with_state;
use issuer::issuer_router;
use platform::client_scope::assign_client_scope;
use platform::notify::NotifierRegistry;
use platform::storage::MemoryStore;

pub use config::PortalConfig;
pub use notifications::notifications_router;

/// Build the `/api` routes over a fresh in-memory store
pub fn build_router(config: PortalConfig) -> Router {
    build_router_with_store(MemoryStore::new(), config)
}

/// Build the `/api` routes over `store`
pub fn build_router_with_store(store: MemoryStore, config: PortalConfig) -> Router {
    let PortalConfig {
        auth,
        issuer,
        notify,
        client_scope,
    } = config;

    let notifiers = NotifierRegistry::new(notify);
    spawn_idle_sweep(store.clone(), notifiers.clone());

    let gate = AuthMiddlewareState {
        repo: Arc::new(StoredSessionRepository::new(
            store.clone(),
            auth.session_key.clone(),
        )),
        config: Arc::new(auth.clone()),
    };

    Router::new()
        .nest(
            "/api/auth",
            auth_router(store.clone(), auth, notifiers.clone()),
        )
        .nest(
            "/api/issuer",
            issuer_router(store, issuer, notifiers.clone(), gate),
        )
        .nest("/api/notifications", notifications_router(notifiers))
        .layer(from_fn_with_state(Arc::new(client_scope), assign_client_scope))
}

/// Periodically drop idle notifiers and stale transient data.
///
/// Without a runtime (plain router construction) nothing is scheduled.
pub fn spawn_idle_sweep(store: MemoryStore, notifiers: NotifierRegistry) {
    let Ok(handle) = tokio::runtime::Handle::try_current() else {
        tracing::debug!("No runtime; idle sweep not scheduled");
        return;
    };

    let idle_after = notifiers.config().idle_after;
    let period = (idle_after / 4).max(Duration::from_secs(1));

    handle.spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // first tick fires immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let notifiers_evicted = notifiers.evict_idle();
            let entries_evicted = store.evict_transient(idle_after).await;
            if notifiers_evicted + entries_evicted > 0 {
                tracing::info!(notifiers_evicted, entries_evicted, "Idle clients swept");
            }
        }
    });
}
