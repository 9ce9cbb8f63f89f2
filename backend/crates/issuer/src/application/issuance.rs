//! Issuance Workflow steps
//!
//! Form submit, preview, back, and the confirmed issuance pipeline. The
//! pipeline runs on its own task: once confirmed it finishes even if the
//! request that started it goes away.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use kernel::id::ClientId;
use platform::navigation::Navigator;
use platform::notify::{Notifier, Severity};
use serde::Serialize;

use crate::application::config::IssuerConfig;
use crate::domain::entities::{CredentialDraft, CredentialForm, IssuedCredentialRecord};
use crate::domain::repository::{CredentialRepository, DraftRepository, IssuanceBackend};
use crate::domain::workflow::{
    CUSTOM_DEGREE_VALUE, WorkflowEvent, WorkflowState, validate_form,
};
use crate::error::{IssuerError, IssuerResult};

pub const NO_DRAFT_MESSAGE: &str = "No credential data to issue";
pub const ISSUED_MESSAGE: &str = "Credential issued successfully!";

pub const FORM_PAGE: &str = "issue.html";
pub const PREVIEW_PAGE: &str = "credential-preview.html";
pub const RESULT_PAGE: &str = "preview.html";

/// Initial values of the issuance form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDefaults {
    /// Today, `YYYY-MM-DD`
    pub graduation_date: String,
    /// Degree select value that reveals the custom degree field
    pub custom_degree_value: &'static str,
}

/// Query string of the result page
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPageQuery<'a> {
    pub transaction_ref: &'a str,
    pub content_ref: &'a str,
    pub subject_name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssuanceOutcome {
    Issued(Box<IssuedCredentialRecord>),
    /// Nothing to issue; the page was sent back to the form
    Aborted,
}

pub struct IssuanceWorkflow<R, B>
where
    R: DraftRepository + CredentialRepository + Send + Sync + 'static,
    B: IssuanceBackend + Send + Sync + 'static,
{
    repo: Arc<R>,
    backend: Arc<B>,
    config: Arc<IssuerConfig>,
}

impl<R, B> IssuanceWorkflow<R, B>
where
    R: DraftRepository + CredentialRepository + Send + Sync + 'static,
    B: IssuanceBackend + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, backend: Arc<B>, config: Arc<IssuerConfig>) -> Self {
        Self {
            repo,
            backend,
            config,
        }
    }

    pub fn form_defaults(&self, today: NaiveDate) -> FormDefaults {
        FormDefaults {
            graduation_date: today.format("%Y-%m-%d").to_string(),
            custom_degree_value: CUSTOM_DEGREE_VALUE,
        }
    }

    /// Validate the form and hand it to the preview page.
    ///
    /// A rejected form is reported through an error notification and
    /// `IssuerError::Validation`; nothing is stored and no navigation happens.
    pub async fn submit<N>(
        &self,
        client: ClientId,
        form: CredentialForm,
        notifier: &Notifier,
        navigator: &N,
    ) -> IssuerResult<CredentialDraft>
    where
        N: Navigator + ?Sized,
    {
        let draft = match validate_form(form) {
            Ok(draft) => draft,
            Err(rejection) => {
                WorkflowState::Drafting.advance(WorkflowEvent::Rejected)?;
                let message = rejection.message();
                notifier.notify(message.clone(), Severity::Error);
                return Err(IssuerError::Validation(message));
            }
        };

        self.repo.save_draft(client, &draft).await?;
        let state = WorkflowState::Drafting.advance(WorkflowEvent::Submitted)?;
        tracing::debug!(client_id = %client, state = ?state, "Draft handed to preview");

        navigator.navigate(self.config.page(PREVIEW_PAGE));
        Ok(draft)
    }

    /// Draft for the preview page, or `None` after sending the page back
    /// to the form
    pub async fn preview<N>(
        &self,
        client: ClientId,
        notifier: &Notifier,
        navigator: &N,
    ) -> IssuerResult<Option<CredentialDraft>>
    where
        N: Navigator + ?Sized,
    {
        let draft = self.repo.load_draft(client).await?;
        if draft.is_none() {
            self.abort(client, notifier, navigator)?;
        }
        Ok(draft)
    }

    /// "Back" from the preview; the handoff stays for the form page
    pub fn go_back<N>(&self, navigator: &N) -> IssuerResult<()>
    where
        N: Navigator + ?Sized,
    {
        WorkflowState::Previewing.advance(WorkflowEvent::Back)?;
        navigator.navigate(self.config.page(FORM_PAGE));
        Ok(())
    }

    /// Run the issuance pipeline for the handed-off draft and wait for it
    pub async fn confirm_issue(
        &self,
        client: ClientId,
        notifier: Arc<Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> IssuerResult<IssuanceOutcome> {
        let Some(draft) = self.repo.load_draft(client).await? else {
            self.abort(client, &notifier, &*navigator)?;
            return Ok(IssuanceOutcome::Aborted);
        };

        let run = IssuanceRun {
            repo: self.repo.clone(),
            backend: self.backend.clone(),
            config: self.config.clone(),
            client,
            notifier,
            navigator,
        };

        let record = tokio::spawn(run.execute(draft))
            .await
            .map_err(|e| IssuerError::Internal(format!("issuance task failed: {e}")))??;

        Ok(IssuanceOutcome::Issued(Box::new(record)))
    }

    /// Everything issued by this client, oldest first
    pub async fn issued(&self, client: ClientId) -> IssuerResult<Vec<IssuedCredentialRecord>> {
        self.repo.list(client).await
    }

    fn abort<N>(&self, client: ClientId, notifier: &Notifier, navigator: &N) -> IssuerResult<()>
    where
        N: Navigator + ?Sized,
    {
        let state = WorkflowState::Previewing.advance(WorkflowEvent::HandoffMissing)?;
        tracing::info!(client_id = %client, state = ?state, "No credential handoff");

        notifier.notify(NO_DRAFT_MESSAGE, Severity::Error);
        navigator.navigate(self.config.page(FORM_PAGE));
        Ok(())
    }
}

/// One confirmed issuance, owned by its task
struct IssuanceRun<R, B> {
    repo: Arc<R>,
    backend: Arc<B>,
    config: Arc<IssuerConfig>,
    client: ClientId,
    notifier: Arc<Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl<R, B> IssuanceRun<R, B>
where
    R: DraftRepository + CredentialRepository + Send + Sync + 'static,
    B: IssuanceBackend + Send + Sync + 'static,
{
    async fn execute(self, draft: CredentialDraft) -> IssuerResult<IssuedCredentialRecord> {
        let result = self.run_stages(draft).await;
        if let Err(e) = &result {
            tracing::error!(client_id = %self.client, error = %e, "Issuance failed");
            self.notifier
                .notify("Credential issuance failed", Severity::Error);
        }
        result
    }

    async fn run_stages(&self, draft: CredentialDraft) -> IssuerResult<IssuedCredentialRecord> {
        let mut state = WorkflowState::Previewing.advance(WorkflowEvent::Confirmed)?;

        while let WorkflowState::Issuing(stage) = state {
            self.notifier.notify(stage.announcement(), Severity::Info);
            self.backend.run_stage(stage, &draft).await?;
            state = state.advance(WorkflowEvent::StageCompleted)?;
        }

        let refs = self.backend.ledger_refs(&draft).await?;
        let record = IssuedCredentialRecord::issue(draft, refs, Utc::now());

        let total = self.repo.append(self.client, &record).await?;
        self.repo.clear_draft(self.client).await?;

        tracing::info!(
            client_id = %self.client,
            transaction_ref = %record.transaction_ref,
            content_ref = %record.content_ref,
            total_issued = total,
            "Credential issued"
        );
        self.notifier.notify(ISSUED_MESSAGE, Severity::Success);

        tokio::time::sleep(self.config.redirect_delay).await;
        self.navigator.navigate(self.result_page(&record)?);

        Ok(record)
    }

    fn result_page(&self, record: &IssuedCredentialRecord) -> IssuerResult<String> {
        let query = serde_urlencoded::to_string(ResultPageQuery {
            transaction_ref: &record.transaction_ref,
            content_ref: &record.content_ref,
            subject_name: &record.draft.full_name,
        })
        .map_err(|e| IssuerError::Internal(format!("result page query: {e}")))?;

        Ok(format!("{}?{}", self.config.page(RESULT_PAGE), query))
    }
}
