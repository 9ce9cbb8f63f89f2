//! API DTOs (Data Transfer Objects)
//!
//! The issuance form body is [`CredentialForm`](crate::domain::entities::CredentialForm)
//! itself; its field names are the page's form ids.

use serde::Serialize;

use crate::application::dashboard::DashboardView;
use crate::domain::entities::{CredentialDraft, IssuedCredentialRecord};

/// Dashboard content: view models plus ready-to-insert HTML
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub view: DashboardView,
    /// Inner HTML of `#statsGrid`
    pub stats_html: String,
    /// Inner HTML of `#recentActivity tbody`
    pub activity_html: String,
}

/// Preview page content
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub draft: CredentialDraft,
}

/// Issued credentials of the client
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialListResponse {
    pub total: usize,
    pub credentials: Vec<IssuedCredentialRecord>,
}
