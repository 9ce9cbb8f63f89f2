//! HTTP Handlers

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use platform::client_scope::ClientScope;
use platform::navigation::NavigationSlot;
use platform::notify::{NativeConfirm, NotifierRegistry};

use crate::application::config::AuthConfig;
use crate::application::{AuthGate, SignInInput, SignInUseCase, active_page};
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    LogoutRequest, PageContextResponse, PageQuery, SessionStatusResponse, SignInRequest,
    SignInResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub notifiers: NotifierRegistry,
}

impl<R> AuthAppState<R>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    fn gate(&self) -> AuthGate<R> {
        AuthGate::new(self.repo.clone(), self.config.clone())
    }
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/signin
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    scope: ClientScope,
    Json(req): Json<SignInRequest>,
) -> AuthResult<Json<SignInResponse>>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone());

    let input = SignInInput {
        email: req.email,
        name: req.name,
        institution: req.institution,
        did: req.did,
    };

    let record = use_case.execute(scope.id(), input).await?;

    Ok(Json(SignInResponse {
        user: record.display(),
    }))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/status
pub async fn session_status<R>(
    State(state): State<AuthAppState<R>>,
    scope: ClientScope,
) -> Json<SessionStatusResponse>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    let user = state.gate().sessions().get_current(scope.id()).await;

    Json(SessionStatusResponse {
        authenticated: user.is_some(),
        user: user.map(|u| u.display()),
    })
}

// ============================================================================
// Page Hydration
// ============================================================================

/// GET /api/auth/page?location=
///
/// Boot step of every protected page.
pub async fn page_context<R>(
    State(state): State<AuthAppState<R>>,
    scope: ClientScope,
    Query(query): Query<PageQuery>,
) -> Response
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    let gate = state.gate();
    let navigation = NavigationSlot::new();

    if !gate.require_auth(scope.id(), &navigation).await {
        return navigation.into_response_or(StatusCode::UNAUTHORIZED);
    }

    // Signed out between the check and the read
    let Some(user) = gate.sessions().get_current(scope.id()).await else {
        return StatusCode::UNAUTHORIZED.into_response();
    };

    Json(PageContextResponse {
        user: user.display(),
        active_page: active_page(&query.location),
    })
    .into_response()
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
///
/// Without `confirmed` in the body this waits until the page answers the
/// logout prompt.
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    scope: ClientScope,
    Json(req): Json<LogoutRequest>,
) -> AuthResult<Response>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    let gate = state.gate();
    let navigation = NavigationSlot::new();

    let logged_out = match req.confirmed {
        Some(answer) => {
            gate.logout(scope.id(), &req.location, &NativeConfirm(answer), &navigation)
                .await?
        }
        None => {
            let notifier = state.notifiers.for_client(scope.id());
            gate.logout(scope.id(), &req.location, &*notifier, &navigation)
                .await?
        }
    };

    if !logged_out {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok(navigation.into_response_or(StatusCode::NO_CONTENT))
}
