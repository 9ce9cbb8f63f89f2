//! Notification routes
//!
//! The page polls these to show the client's toasts and to answer
//! confirmation prompts that a pending request is waiting on. Polling never
//! creates a notifier; only components that notify do.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use kernel::error::app_error::{AppResult, OptionExt};
use kernel::id::PromptId;
use platform::client_scope::ClientScope;
use platform::notify::{Notification, NotifierRegistry, PendingPrompt};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct NotificationQuery {
    /// Last sequence number the page has seen
    #[serde(default)]
    pub after: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsResponse {
    /// What is visible right now
    pub current: Option<Notification>,
    /// Everything newer than `after`, oldest first
    pub history: Vec<Notification>,
}

#[derive(Debug, Serialize)]
pub struct DismissResponse {
    pub dismissed: bool,
}

#[derive(Debug, Deserialize)]
pub struct PromptAnswer {
    pub confirmed: bool,
}

pub fn notifications_router(notifiers: NotifierRegistry) -> Router {
    Router::new()
        .route("/", get(list_notifications))
        .route("/{seq}/dismiss", post(dismiss_notification))
        .route("/prompts", get(list_prompts))
        .route("/prompts/{id}", post(answer_prompt))
        .with_state(notifiers)
}

/// GET /api/notifications
async fn list_notifications(
    State(notifiers): State<NotifierRegistry>,
    scope: ClientScope,
    Query(query): Query<NotificationQuery>,
) -> Json<NotificationsResponse> {
    let response = match notifiers.get(scope.id()) {
        Some(notifier) => NotificationsResponse {
            current: notifier.current(),
            history: notifier.history_since(query.after),
        },
        None => NotificationsResponse {
            current: None,
            history: Vec::new(),
        },
    };
    Json(response)
}

/// POST /api/notifications/{seq}/dismiss
async fn dismiss_notification(
    State(notifiers): State<NotifierRegistry>,
    scope: ClientScope,
    Path(seq): Path<u64>,
) -> Json<DismissResponse> {
    let dismissed = notifiers
        .get(scope.id())
        .is_some_and(|notifier| notifier.dismiss(seq));
    Json(DismissResponse { dismissed })
}

/// GET /api/notifications/prompts
async fn list_prompts(
    State(notifiers): State<NotifierRegistry>,
    scope: ClientScope,
) -> Json<Vec<PendingPrompt>> {
    Json(
        notifiers
            .get(scope.id())
            .map(|notifier| notifier.pending_prompts())
            .unwrap_or_default(),
    )
}

/// POST /api/notifications/prompts/{id}
async fn answer_prompt(
    State(notifiers): State<NotifierRegistry>,
    scope: ClientScope,
    Path(id): Path<PromptId>,
    Json(answer): Json<PromptAnswer>,
) -> AppResult<Json<DismissResponse>> {
    notifiers
        .get(scope.id())
        .filter(|notifier| notifier.answer(id, answer.confirmed))
        .ok_or_not_found("Prompt is no longer open")?;

    tracing::debug!(client_id = %scope.id(), prompt_id = %id, confirmed = answer.confirmed, "Prompt answered");
    Ok(Json(DismissResponse { dismissed: true }))
}
