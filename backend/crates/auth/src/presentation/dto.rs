//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::user_record::UserDisplay;

// ============================================================================
// Sign In
// ============================================================================

/// Sign in request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub did: Option<String>,
}

/// Sign in response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub user: UserDisplay,
}

// ============================================================================
// Session Status
// ============================================================================

/// Session status response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    pub user: Option<UserDisplay>,
}

// ============================================================================
// Page Hydration
// ============================================================================

/// Query of `GET /page`
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    /// Current page location (path or full URL)
    pub location: String,
}

/// What a protected page shows around its content
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContextResponse {
    pub user: UserDisplay,
    /// Sidebar entry to highlight
    pub active_page: String,
}

// ============================================================================
// Logout
// ============================================================================

/// Logout request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    /// Current page location (path or full URL)
    pub location: String,
    /// Answer from the browser's native dialog. Absent: the portal asks
    /// through a notification prompt and this request waits for it.
    #[serde(default)]
    pub confirmed: Option<bool>,
}
