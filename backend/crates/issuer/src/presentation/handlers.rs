//! HTTP Handlers
//!
//! All routes here sit behind the auth gate middleware.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use std::sync::Arc;

use platform::client_scope::ClientScope;
use platform::navigation::{NavigationSlot, Navigator, see_other};
use platform::notify::NotifierRegistry;

use crate::application::config::IssuerConfig;
use crate::application::dashboard::{DashboardPresenter, DashboardView};
use crate::application::issuance::{FormDefaults, IssuanceOutcome, IssuanceWorkflow};
use crate::domain::entities::CredentialForm;
use crate::domain::repository::{
    CredentialRepository, DashboardRepository, DraftRepository, IssuanceBackend,
};
use crate::error::{IssuerError, IssuerResult};
use crate::presentation::dto::{CredentialListResponse, DashboardResponse, PreviewResponse};
use crate::presentation::view::{activity_rows_html, stats_html};

/// Shared state for issuer handlers
#[derive(Clone)]
pub struct IssuerAppState<R, B>
where
    R: DashboardRepository + DraftRepository + CredentialRepository + Clone + Send + Sync + 'static,
    B: IssuanceBackend + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub backend: Arc<B>,
    pub config: Arc<IssuerConfig>,
    pub notifiers: NotifierRegistry,
}

impl<R, B> IssuerAppState<R, B>
where
    R: DashboardRepository + DraftRepository + CredentialRepository + Clone + Send + Sync + 'static,
    B: IssuanceBackend + Clone + Send + Sync + 'static,
{
    fn dashboard(&self) -> DashboardPresenter<R> {
        DashboardPresenter::new(self.repo.clone(), self.config.clone())
    }

    fn workflow(&self) -> IssuanceWorkflow<R, B> {
        IssuanceWorkflow::new(self.repo.clone(), self.backend.clone(), self.config.clone())
    }
}

fn dashboard_response(view: DashboardView) -> DashboardResponse {
    DashboardResponse {
        stats_html: stats_html(&view.stats),
        activity_html: activity_rows_html(&view.activity),
        view,
    }
}

// ============================================================================
// Dashboard
// ============================================================================

/// GET /api/issuer/dashboard
pub async fn get_dashboard<R, B>(
    State(state): State<IssuerAppState<R, B>>,
) -> IssuerResult<Json<DashboardResponse>>
where
    R: DashboardRepository + DraftRepository + CredentialRepository + Clone + Send + Sync + 'static,
    B: IssuanceBackend + Clone + Send + Sync + 'static,
{
    let view = state.dashboard().render().await?;
    Ok(Json(dashboard_response(view)))
}

/// POST /api/issuer/dashboard/refresh
pub async fn refresh_dashboard<R, B>(
    State(state): State<IssuerAppState<R, B>>,
    scope: ClientScope,
) -> IssuerResult<Json<DashboardResponse>>
where
    R: DashboardRepository + DraftRepository + CredentialRepository + Clone + Send + Sync + 'static,
    B: IssuanceBackend + Clone + Send + Sync + 'static,
{
    let notifier = state.notifiers.for_client(scope.id());
    let view = state.dashboard().refresh(&notifier).await?;
    Ok(Json(dashboard_response(view)))
}

/// GET /api/issuer/dashboard/export
pub async fn export_dashboard<R, B>(
    State(state): State<IssuerAppState<R, B>>,
    scope: ClientScope,
) -> IssuerResult<Response>
where
    R: DashboardRepository + DraftRepository + CredentialRepository + Clone + Send + Sync + 'static,
    B: IssuanceBackend + Clone + Send + Sync + 'static,
{
    let notifier = state.notifiers.for_client(scope.id());
    let file = state
        .dashboard()
        .export(&notifier, Utc::now().date_naive())
        .await?;

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        file.file_name
    ))
    .map_err(|e| IssuerError::Internal(format!("content disposition: {e}")))?;

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.content,
    )
        .into_response())
}

// ============================================================================
// Issuance
// ============================================================================

/// GET /api/issuer/issue/form
pub async fn issue_form<R, B>(State(state): State<IssuerAppState<R, B>>) -> Json<FormDefaults>
where
    R: DashboardRepository + DraftRepository + CredentialRepository + Clone + Send + Sync + 'static,
    B: IssuanceBackend + Clone + Send + Sync + 'static,
{
    Json(state.workflow().form_defaults(Utc::now().date_naive()))
}

/// POST /api/issuer/issue/submit
pub async fn submit_issue<R, B>(
    State(state): State<IssuerAppState<R, B>>,
    scope: ClientScope,
    Json(form): Json<CredentialForm>,
) -> IssuerResult<Response>
where
    R: DashboardRepository + DraftRepository + CredentialRepository + Clone + Send + Sync + 'static,
    B: IssuanceBackend + Clone + Send + Sync + 'static,
{
    let notifier = state.notifiers.for_client(scope.id());
    let navigation = NavigationSlot::new();

    let draft = state
        .workflow()
        .submit(scope.id(), form, &notifier, &navigation)
        .await?;

    Ok(navigation.into_response_or(Json(PreviewResponse { draft })))
}

/// GET /api/issuer/issue/preview
pub async fn preview_issue<R, B>(
    State(state): State<IssuerAppState<R, B>>,
    scope: ClientScope,
) -> IssuerResult<Response>
where
    R: DashboardRepository + DraftRepository + CredentialRepository + Clone + Send + Sync + 'static,
    B: IssuanceBackend + Clone + Send + Sync + 'static,
{
    let notifier = state.notifiers.for_client(scope.id());
    let navigation = NavigationSlot::new();

    match state
        .workflow()
        .preview(scope.id(), &notifier, &navigation)
        .await?
    {
        Some(draft) => Ok(Json(PreviewResponse { draft }).into_response()),
        None => Ok(navigation.into_response_or(StatusCode::NOT_FOUND)),
    }
}

/// POST /api/issuer/issue/back
pub async fn back_to_form<R, B>(State(state): State<IssuerAppState<R, B>>) -> IssuerResult<Response>
where
    R: DashboardRepository + DraftRepository + CredentialRepository + Clone + Send + Sync + 'static,
    B: IssuanceBackend + Clone + Send + Sync + 'static,
{
    let navigation = NavigationSlot::new();
    state.workflow().go_back(&navigation)?;
    Ok(navigation.into_response_or(StatusCode::NO_CONTENT))
}

/// POST /api/issuer/issue/confirm
///
/// Answers once the pipeline is done; progress shows up as notifications.
pub async fn confirm_issue<R, B>(
    State(state): State<IssuerAppState<R, B>>,
    scope: ClientScope,
) -> IssuerResult<Response>
where
    R: DashboardRepository + DraftRepository + CredentialRepository + Clone + Send + Sync + 'static,
    B: IssuanceBackend + Clone + Send + Sync + 'static,
{
    let notifier = state.notifiers.for_client(scope.id());
    let navigation = Arc::new(NavigationSlot::new());
    let navigator: Arc<dyn Navigator> = navigation.clone();

    let outcome = state
        .workflow()
        .confirm_issue(scope.id(), notifier, navigator)
        .await?;

    if let Some(target) = navigation.take() {
        return Ok(see_other(&target));
    }
    Ok(match outcome {
        IssuanceOutcome::Issued(record) => Json(*record).into_response(),
        IssuanceOutcome::Aborted => StatusCode::NOT_FOUND.into_response(),
    })
}

/// GET /api/issuer/credentials
pub async fn list_credentials<R, B>(
    State(state): State<IssuerAppState<R, B>>,
    scope: ClientScope,
) -> IssuerResult<Json<CredentialListResponse>>
where
    R: DashboardRepository + DraftRepository + CredentialRepository + Clone + Send + Sync + 'static,
    B: IssuanceBackend + Clone + Send + Sync + 'static,
{
    let credentials = state.workflow().issued(scope.id()).await?;
    Ok(Json(CredentialListResponse {
        total: credentials.len(),
        credentials,
    }))
}
