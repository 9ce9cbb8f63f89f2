//! Dashboard Presenter
//!
//! Turns the dashboard data into card and row view models, and runs the
//! refresh and export actions with their progress notifications.

use std::sync::Arc;

use chrono::NaiveDate;
use platform::notify::{Notifier, Severity};
use serde::Serialize;

use crate::application::config::IssuerConfig;
use crate::domain::entities::{ActivityRecord, Statistic};
use crate::domain::repository::DashboardRepository;
use crate::domain::services::{export_file_name, format_activity_date, short_ref};
use crate::domain::value_objects::CredentialStatus;
use crate::error::{IssuerError, IssuerResult};

/// One statistic card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCardView {
    pub title: String,
    pub value: String,
    pub change: String,
    pub change_class: Option<&'static str>,
    pub change_icon: Option<&'static str>,
}

/// One recent-activity row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRowView {
    pub student: String,
    pub degree: String,
    /// `Jan 15, 2024`
    pub date_label: String,
    pub status: CredentialStatus,
    pub badge_class: &'static str,
    pub transaction_ref: String,
    pub short_ref: String,
    pub explorer_url: String,
    pub detail_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub stats: Vec<StatCardView>,
    pub activity: Vec<ActivityRowView>,
}

/// Downloadable export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    /// Pretty-printed JSON of the activity list
    pub content: String,
}

pub struct DashboardPresenter<D>
where
    D: DashboardRepository + Send + Sync + 'static,
{
    repo: Arc<D>,
    config: Arc<IssuerConfig>,
}

impl<D> DashboardPresenter<D>
where
    D: DashboardRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<D>, config: Arc<IssuerConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn render(&self) -> IssuerResult<DashboardView> {
        let stats = self.repo.statistics().await?;
        let activity = self.repo.recent_activity().await?;

        Ok(DashboardView {
            stats: stats.iter().map(stat_card).collect(),
            activity: activity
                .iter()
                .map(|record| self.activity_row(record))
                .collect::<IssuerResult<_>>()?,
        })
    }

    /// Re-render with progress notifications
    pub async fn refresh(&self, notifier: &Notifier) -> IssuerResult<DashboardView> {
        notifier.notify("Refreshing data...", Severity::Info);
        tokio::time::sleep(self.config.refresh_delay).await;

        let view = self.render().await?;

        notifier.notify("Data refreshed successfully", Severity::Success);
        tracing::debug!(rows = view.activity.len(), "Dashboard refreshed");
        Ok(view)
    }

    /// Activity list as a JSON download named after `today`
    pub async fn export(&self, notifier: &Notifier, today: NaiveDate) -> IssuerResult<ExportFile> {
        notifier.notify("Preparing export file...", Severity::Info);
        tokio::time::sleep(self.config.export_delay).await;

        let activity = self.repo.recent_activity().await?;
        let file = ExportFile {
            file_name: export_file_name(today),
            content: serde_json::to_string_pretty(&activity)?,
        };

        notifier.notify("Export downloaded successfully", Severity::Success);
        tracing::info!(file_name = %file.file_name, records = activity.len(), "Dashboard exported");
        Ok(file)
    }

    fn activity_row(&self, record: &ActivityRecord) -> IssuerResult<ActivityRowView> {
        let detail_query = serde_urlencoded::to_string([("id", record.transaction_ref.as_str())])
            .map_err(|e| IssuerError::Internal(format!("detail link: {e}")))?;

        Ok(ActivityRowView {
            student: record.student_name.clone(),
            degree: record.degree.clone(),
            date_label: format_activity_date(record.date),
            status: record.status,
            badge_class: record.status.badge_class(),
            transaction_ref: record.transaction_ref.clone(),
            short_ref: short_ref(&record.transaction_ref),
            explorer_url: self.config.explorer_url(&record.transaction_ref),
            detail_url: format!("{}?{}", self.config.page("credential.html"), detail_query),
        })
    }
}

fn stat_card(stat: &Statistic) -> StatCardView {
    StatCardView {
        title: stat.title.clone(),
        value: stat.value.clone(),
        change: stat.change.clone(),
        change_class: stat.polarity.css_class(),
        change_icon: stat.polarity.icon(),
    }
}
