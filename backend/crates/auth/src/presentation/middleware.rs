//! Auth Middleware
//!
//! Middleware for requiring authentication on protected routes.

use axum::body::Body;
use axum::http::{HeaderValue, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use platform::client_scope::ClientScope;
use platform::navigation::NavigationSlot;
use std::sync::Arc;

use crate::application::AuthGate;
use crate::application::config::AuthConfig;
use crate::domain::repository::SessionRepository;

/// Set on responses that were turned away for lack of a session
pub const AUTH_REQUIRED_HEADER: &str = "x-auth-required";

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// Middleware that requires a signed-in client
///
/// Unauthenticated requests never reach the handler; they are redirected to
/// the login page.
pub async fn require_auth_session<R>(
    state: AuthMiddlewareState<R>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    let Some(scope) = req.extensions().get::<ClientScope>().copied() else {
        tracing::error!("Client scope middleware is not installed");
        return Err(StatusCode::INTERNAL_SERVER_ERROR.into_response());
    };

    let gate = AuthGate::new(state.repo.clone(), state.config.clone());
    let navigation = NavigationSlot::new();

    if !gate.require_auth(scope.id(), &navigation).await {
        let mut response = navigation.into_response_or(StatusCode::UNAUTHORIZED);
        response
            .headers_mut()
            .insert(AUTH_REQUIRED_HEADER, HeaderValue::from_static("true"));
        return Err(response);
    }

    Ok(next.run(req).await)
}
