//! Unit tests for the issuer crate

#[cfg(test)]
mod workflow_tests {
    use crate::domain::entities::CredentialForm;
    use crate::domain::workflow::*;

    fn valid_form() -> CredentialForm {
        CredentialForm {
            student_did: "did:example:abc123".to_string(),
            student_email: "usama@university.edu".to_string(),
            full_name: "Usama Saleem".to_string(),
            student_id: "FA20-BCS-001".to_string(),
            degree_title: "BS Computer Science".to_string(),
            gpa: "3.8".to_string(),
            graduation_date: "2024-06-30".to_string(),
            store_on_chain: true,
            pin_to_ipfs: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_happy_path_transitions() {
        let mut state = WorkflowState::Drafting
            .advance(WorkflowEvent::Submitted)
            .unwrap();
        assert_eq!(state, WorkflowState::Previewing);

        state = state.advance(WorkflowEvent::Confirmed).unwrap();
        let mut stages = Vec::new();
        while let WorkflowState::Issuing(stage) = state {
            stages.push(stage);
            state = state.advance(WorkflowEvent::StageCompleted).unwrap();
        }

        assert_eq!(stages, IssuanceStage::ALL.to_vec());
        assert_eq!(state, WorkflowState::Issued);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_rejected_and_back_return_to_drafting() {
        assert_eq!(
            WorkflowState::Drafting.advance(WorkflowEvent::Rejected),
            Ok(WorkflowState::Drafting)
        );
        assert_eq!(
            WorkflowState::Previewing.advance(WorkflowEvent::Back),
            Ok(WorkflowState::Drafting)
        );
    }

    #[test]
    fn test_missing_handoff_aborts() {
        let state = WorkflowState::Previewing
            .advance(WorkflowEvent::HandoffMissing)
            .unwrap();
        assert_eq!(state, WorkflowState::Aborted);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_invalid_transitions() {
        let err = WorkflowState::Drafting
            .advance(WorkflowEvent::Confirmed)
            .unwrap_err();
        assert_eq!(err.from, WorkflowState::Drafting);
        assert_eq!(err.event, WorkflowEvent::Confirmed);

        assert!(WorkflowState::Issued.advance(WorkflowEvent::Back).is_err());
        assert!(
            WorkflowState::Aborted
                .advance(WorkflowEvent::Submitted)
                .is_err()
        );
        assert!(
            WorkflowState::Issuing(IssuanceStage::Sign)
                .advance(WorkflowEvent::Back)
                .is_err()
        );
    }

    #[test]
    fn test_stage_announcements_are_distinct() {
        let messages: Vec<_> = IssuanceStage::ALL.iter().map(|s| s.announcement()).collect();
        assert_eq!(messages[0], "Generating credential JSON...");
        assert_eq!(messages[3], "Writing to Polygon blockchain...");
        for (i, a) in messages.iter().enumerate() {
            assert!(messages[i + 1..].iter().all(|b| a != b));
        }
    }

    #[test]
    fn test_validate_form_accepts_valid_form() {
        let draft = validate_form(valid_form()).unwrap();
        assert_eq!(draft.student_did, "did:example:abc123");
        assert_eq!(draft.degree_title, "BS Computer Science");
        assert!(draft.store_on_chain);
        assert_eq!(draft.expiration_date, "");
    }

    #[test]
    fn test_validate_form_trims_fields() {
        let form = CredentialForm {
            full_name: "  Usama Saleem ".to_string(),
            gpa: " 3.8".to_string(),
            ..valid_form()
        };
        let draft = validate_form(form).unwrap();
        assert_eq!(draft.full_name, "Usama Saleem");
        assert_eq!(draft.gpa, "3.8");
    }

    #[test]
    fn test_validate_form_missing_required() {
        let clears: [fn(&mut CredentialForm); 5] = [
            |f| f.student_did.clear(),
            |f| f.full_name = "   ".to_string(),
            |f| f.degree_title.clear(),
            |f| f.gpa.clear(),
            |f| f.graduation_date.clear(),
        ];
        for clear in clears {
            let mut form = valid_form();
            clear(&mut form);
            assert_eq!(validate_form(form), Err(DraftRejection::MissingRequired));
        }
    }

    #[test]
    fn test_validate_form_optional_fields_may_be_blank() {
        let form = CredentialForm {
            student_email: String::new(),
            student_id: String::new(),
            major: String::new(),
            honors: String::new(),
            ..valid_form()
        };
        assert!(validate_form(form).is_ok());
    }

    #[test]
    fn test_validate_form_rejects_bad_did() {
        let form = CredentialForm {
            student_did: "not-a-did".to_string(),
            ..valid_form()
        };
        let rejection = validate_form(form).unwrap_err();
        assert_eq!(rejection, DraftRejection::InvalidDid);
        assert_eq!(rejection.message(), "Please enter a valid DID format");
    }

    #[test]
    fn test_validate_form_custom_degree() {
        let form = CredentialForm {
            degree_title: CUSTOM_DEGREE_VALUE.to_string(),
            custom_degree: Some("PhD Quantum Computing".to_string()),
            ..valid_form()
        };
        let draft = validate_form(form).unwrap();
        assert_eq!(draft.degree_title, "PhD Quantum Computing");

        let form = CredentialForm {
            degree_title: CUSTOM_DEGREE_VALUE.to_string(),
            custom_degree: None,
            ..valid_form()
        };
        assert_eq!(validate_form(form), Err(DraftRejection::MissingRequired));
    }

    #[test]
    fn test_validate_form_dates() {
        let form = CredentialForm {
            graduation_date: "30/06/2024".to_string(),
            ..valid_form()
        };
        let rejection = validate_form(form).unwrap_err();
        assert_eq!(
            rejection.message(),
            "Please enter a valid graduation date (YYYY-MM-DD)"
        );

        let form = CredentialForm {
            expiration_date: "someday".to_string(),
            ..valid_form()
        };
        assert_eq!(
            validate_form(form),
            Err(DraftRejection::InvalidDate {
                field: "expiration date"
            })
        );

        let form = CredentialForm {
            expiration_date: "2030-06-30".to_string(),
            ..valid_form()
        };
        assert_eq!(validate_form(form).unwrap().expiration_date, "2030-06-30");
    }
}

#[cfg(test)]
mod entity_tests {
    use crate::domain::entities::*;
    use crate::domain::value_objects::*;
    use crate::infra::fixtures::{sample_activity, sample_statistics};
    use chrono::{TimeZone, Utc};

    fn draft() -> CredentialDraft {
        CredentialDraft {
            student_did: "did:example:abc123".to_string(),
            student_email: String::new(),
            full_name: "Ali Raza".to_string(),
            student_id: String::new(),
            degree_title: "BBA".to_string(),
            major: String::new(),
            gpa: "3.5".to_string(),
            graduation_date: "2024-06-30".to_string(),
            honors: String::new(),
            store_on_chain: true,
            pin_to_ipfs: false,
            expiration_date: String::new(),
        }
    }

    #[test]
    fn test_form_field_names() {
        let form: CredentialForm = serde_json::from_value(serde_json::json!({
            "studentDID": "did:example:abc123",
            "fullName": "Ali Raza",
            "degreeTitle": "other",
            "customDegree": "MPhil",
            "gpa": "3.5",
            "graduationDate": "2024-06-30",
            "pinToIPFS": true
        }))
        .unwrap();

        assert_eq!(form.student_did, "did:example:abc123");
        assert_eq!(form.custom_degree.as_deref(), Some("MPhil"));
        assert!(form.pin_to_ipfs);
        assert!(!form.store_on_chain);
        assert_eq!(form.student_email, "");
    }

    #[test]
    fn test_issued_record_shape() {
        let issued_at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let record = IssuedCredentialRecord::issue(
            draft(),
            LedgerRefs {
                transaction_ref: "0xabc".to_string(),
                content_ref: "Qmdef".to_string(),
            },
            issued_at,
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["fullName"], "Ali Raza");
        assert_eq!(json["studentDID"], "did:example:abc123");
        assert_eq!(json["txHash"], "0xabc");
        assert_eq!(json["ipfsHash"], "Qmdef");
        assert_eq!(json["issuedAt"], "2024-01-15T10:30:00.000Z");
        assert_eq!(json["status"], "Valid");

        let back: IssuedCredentialRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_status_badges() {
        assert_eq!(CredentialStatus::Valid.badge_class(), "badge-success");
        assert_eq!(CredentialStatus::Pending.badge_class(), "badge-warning");
        assert_eq!(CredentialStatus::Revoked.badge_class(), "badge-danger");
        assert_eq!(CredentialStatus::Pending.to_string(), "Pending");
    }

    #[test]
    fn test_polarity() {
        assert_eq!(Polarity::Positive.css_class(), Some("positive"));
        assert_eq!(Polarity::Negative.icon(), Some("↓"));
        assert_eq!(Polarity::Neutral.css_class(), None);
        assert_eq!(Polarity::Neutral.icon(), None);
    }

    #[test]
    fn test_fixtures() {
        let stats = sample_statistics();
        assert_eq!(stats.len(), 4);
        assert_eq!(stats[0].title, "Total Issued");
        assert_eq!(stats[2].polarity, Polarity::Neutral);

        let activity = sample_activity();
        assert_eq!(activity.len(), 5);
        assert_eq!(activity[0].student_name, "Usama Saleem");
        assert_eq!(activity[4].status, CredentialStatus::Revoked);

        let json = serde_json::to_value(&activity[0]).unwrap();
        assert_eq!(json["student"], "Usama Saleem");
        assert_eq!(json["date"], "2024-01-15");
        assert_eq!(json["txHash"], "0xabc123");
    }
}

#[cfg(test)]
mod config_tests {
    use crate::application::config::IssuerConfig;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let config = IssuerConfig::default();
        assert_eq!(config.stage_delay_ms(), 1000);
        assert_eq!(config.refresh_delay, Duration::from_millis(500));
        assert_eq!(config.export_delay, Duration::from_secs(1));
        assert_eq!(config.redirect_delay, Duration::from_secs(1));
        assert_eq!(config.draft_key, "credential_preview_data");
        assert_eq!(config.issued_key, "issued_credentials");
    }

    #[test]
    fn test_pages() {
        let config = IssuerConfig::default();
        assert_eq!(config.page("issue.html"), "/issuer-portal/pages/issue.html");
        assert_eq!(
            config.explorer_url("0xabc"),
            "https://polygonscan.com/tx/0xabc"
        );

        let config = IssuerConfig::default().with_pages_base("/campus/pages");
        assert_eq!(config.page("issue.html"), "/campus/pages/issue.html");
    }

    #[test]
    fn test_without_delays() {
        let config = IssuerConfig::without_delays();
        assert_eq!(config.stage_delay, Duration::ZERO);
        assert_eq!(config.redirect_delay, Duration::ZERO);
        assert_eq!(config.pages_base, IssuerConfig::default().pages_base);
    }
}

#[cfg(test)]
mod dashboard_tests {
    use crate::application::config::IssuerConfig;
    use crate::application::dashboard::DashboardPresenter;
    use crate::domain::entities::ActivityRecord;
    use crate::infra::fixtures::sample_activity;
    use crate::infra::storage::StoredIssuerRepository;
    use crate::presentation::view::{activity_rows_html, stats_html};
    use chrono::NaiveDate;
    use platform::notify::{Notifier, NotifyConfig, Severity};
    use platform::storage::MemoryStore;
    use std::sync::Arc;

    fn presenter() -> DashboardPresenter<StoredIssuerRepository<MemoryStore>> {
        let config = IssuerConfig::without_delays();
        let repo = StoredIssuerRepository::new(
            MemoryStore::new(),
            config.draft_key.clone(),
            config.issued_key.clone(),
        );
        DashboardPresenter::new(Arc::new(repo), Arc::new(config))
    }

    #[tokio::test]
    async fn test_render() {
        let view = presenter().render().await.unwrap();
        assert_eq!(view.stats.len(), 4);
        assert_eq!(view.activity.len(), 5);

        let card = &view.stats[0];
        assert_eq!(card.change_class, Some("positive"));
        assert_eq!(card.change_icon, Some("↑"));
        assert_eq!(view.stats[2].change_class, None);

        let row = &view.activity[0];
        assert_eq!(row.date_label, "Jan 15, 2024");
        assert_eq!(row.badge_class, "badge-success");
        assert_eq!(row.short_ref, "0xabc123...");
        assert_eq!(row.explorer_url, "https://polygonscan.com/tx/0xabc123");
        assert_eq!(
            row.detail_url,
            "/issuer-portal/pages/credential.html?id=0xabc123"
        );
    }

    #[tokio::test]
    async fn test_refresh_is_idempotent() {
        let presenter = presenter();
        let notifier = Notifier::new(NotifyConfig::default());

        let first = presenter.refresh(&notifier).await.unwrap();
        let second = presenter.refresh(&notifier).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(stats_html(&first.stats), stats_html(&second.stats));

        let messages: Vec<_> = notifier
            .history_since(0)
            .into_iter()
            .map(|n| (n.message, n.severity))
            .collect();
        assert_eq!(
            messages[..2],
            [
                ("Refreshing data...".to_string(), Severity::Info),
                ("Data refreshed successfully".to_string(), Severity::Success),
            ]
        );
        assert_eq!(messages.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_waits_before_rendering() {
        let config = IssuerConfig::default();
        let repo = StoredIssuerRepository::new(MemoryStore::new(), "d", "i");
        let presenter = DashboardPresenter::new(Arc::new(repo), Arc::new(config));
        let notifier = Notifier::new(NotifyConfig::default());

        let started = tokio::time::Instant::now();
        presenter.refresh(&notifier).await.unwrap();
        assert!(started.elapsed() >= std::time::Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_export() {
        let notifier = Notifier::new(NotifyConfig::default());
        let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();

        let file = presenter().export(&notifier, today).await.unwrap();
        assert_eq!(file.file_name, "issuer-export-2024-01-20.json");
        assert!(file.content.contains('\n'));

        let parsed: Vec<ActivityRecord> = serde_json::from_str(&file.content).unwrap();
        assert_eq!(parsed, sample_activity());

        let last = notifier.current().unwrap();
        assert_eq!(last.message, "Export downloaded successfully");
        assert_eq!(last.severity, Severity::Success);
    }

    #[tokio::test]
    async fn test_html_fragments() {
        let view = presenter().render().await.unwrap();

        let stats = stats_html(&view.stats);
        assert_eq!(stats.matches(r#"class="stats-card""#).count(), 4);
        assert!(stats.contains("↑ +12%"));
        assert!(stats.contains("from last month"));

        let rows = activity_rows_html(&view.activity);
        assert_eq!(rows.matches("<tr>").count(), 5);
        assert!(rows.contains(r#"<span class="badge badge-danger">Revoked</span>"#));
        assert!(rows.contains(r#"href="https://polygonscan.com/tx/0xabc123""#));
        assert!(rows.contains(">0xabc123...</a>"));
    }

    #[test]
    fn test_html_is_escaped() {
        use crate::application::dashboard::ActivityRowView;
        use crate::domain::value_objects::CredentialStatus;

        let row = ActivityRowView {
            student: "<script>alert(1)</script>".to_string(),
            degree: "BS".to_string(),
            date_label: "Jan 1, 2024".to_string(),
            status: CredentialStatus::Valid,
            badge_class: "badge-success",
            transaction_ref: "0x1".to_string(),
            short_ref: "0x1...".to_string(),
            explorer_url: "https://polygonscan.com/tx/0x1".to_string(),
            detail_url: "credential.html?id=0x1&x=\"".to_string(),
        };

        let html = activity_rows_html(&[row]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("id=0x1&amp;x=&quot;"));
    }
}

#[cfg(test)]
mod issuance_tests {
    use crate::application::config::IssuerConfig;
    use crate::application::issuance::*;
    use crate::domain::entities::{CredentialDraft, CredentialForm};
    use crate::domain::repository::{CredentialRepository, DraftRepository, IssuanceBackend};
    use crate::domain::value_objects::LedgerRefs;
    use crate::domain::workflow::{IssuanceStage, MISSING_FIELDS_MESSAGE};
    use crate::error::{IssuerError, IssuerResult};
    use crate::infra::simulated::SimulatedBackend;
    use crate::infra::storage::StoredIssuerRepository;
    use chrono::NaiveDate;
    use kernel::id::ClientId;
    use platform::navigation::{NavigationSlot, Navigator};
    use platform::notify::{Notifier, NotifyConfig, Severity};
    use platform::storage::MemoryStore;
    use std::sync::Arc;
    use std::time::Duration;

    type Repo = StoredIssuerRepository<MemoryStore>;

    fn form() -> CredentialForm {
        CredentialForm {
            student_did: "did:example:abc123".to_string(),
            full_name: "Sara Khan".to_string(),
            degree_title: "BS Software Engineering".to_string(),
            gpa: "3.9".to_string(),
            graduation_date: "2024-06-30".to_string(),
            ..Default::default()
        }
    }

    fn workflow_with<B>(backend: B) -> (IssuanceWorkflow<Repo, B>, Arc<Repo>)
    where
        B: IssuanceBackend + Send + Sync + 'static,
    {
        let config = IssuerConfig::without_delays();
        let repo = Arc::new(StoredIssuerRepository::new(
            MemoryStore::new(),
            config.draft_key.clone(),
            config.issued_key.clone(),
        ));
        let workflow = IssuanceWorkflow::new(repo.clone(), Arc::new(backend), Arc::new(config));
        (workflow, repo)
    }

    fn workflow() -> (IssuanceWorkflow<Repo, SimulatedBackend>, Arc<Repo>) {
        workflow_with(SimulatedBackend::new(Duration::ZERO))
    }

    fn notifier() -> Arc<Notifier> {
        Arc::new(Notifier::new(NotifyConfig::default()))
    }

    #[derive(Clone)]
    struct FailingBackend;

    impl IssuanceBackend for FailingBackend {
        async fn run_stage(&self, stage: IssuanceStage, _draft: &CredentialDraft) -> IssuerResult<()> {
            match stage {
                IssuanceStage::UploadContent => Err(IssuerError::Backend("gateway down".into())),
                _ => Ok(()),
            }
        }

        async fn ledger_refs(&self, _draft: &CredentialDraft) -> IssuerResult<LedgerRefs> {
            Ok(LedgerRefs {
                transaction_ref: "0x0".into(),
                content_ref: "Qm0".into(),
            })
        }
    }

    #[test]
    fn test_form_defaults() {
        let (workflow, _) = workflow();
        let defaults = workflow.form_defaults(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(defaults.graduation_date, "2024-03-09");
        assert_eq!(defaults.custom_degree_value, "other");
    }

    #[tokio::test]
    async fn test_submit_hands_off_and_navigates() {
        let (workflow, repo) = workflow();
        let client = ClientId::new();
        let notifier = notifier();
        let navigation = NavigationSlot::new();

        let draft = workflow
            .submit(client, form(), &notifier, &navigation)
            .await
            .unwrap();

        assert_eq!(repo.load_draft(client).await.unwrap(), Some(draft));
        assert_eq!(
            navigation.take().as_deref(),
            Some("/issuer-portal/pages/credential-preview.html")
        );
        assert!(notifier.history_since(0).is_empty());
    }

    #[tokio::test]
    async fn test_submit_rejects_without_side_effects() {
        let (workflow, repo) = workflow();
        let client = ClientId::new();
        let notifier = notifier();
        let navigation = NavigationSlot::new();

        let form = CredentialForm {
            gpa: String::new(),
            ..form()
        };
        let err = workflow
            .submit(client, form, &notifier, &navigation)
            .await
            .unwrap_err();

        assert!(matches!(err, IssuerError::Validation(ref m) if m == MISSING_FIELDS_MESSAGE));
        assert_eq!(repo.load_draft(client).await.unwrap(), None);
        assert_eq!(navigation.peek(), None);

        let shown = notifier.current().unwrap();
        assert_eq!(shown.message, MISSING_FIELDS_MESSAGE);
        assert_eq!(shown.severity, Severity::Error);
    }

    #[tokio::test]
    async fn test_preview_without_handoff_aborts() {
        let (workflow, _) = workflow();
        let notifier = notifier();
        let navigation = NavigationSlot::new();

        let draft = workflow
            .preview(ClientId::new(), &notifier, &navigation)
            .await
            .unwrap();

        assert_eq!(draft, None);
        assert_eq!(notifier.current().unwrap().message, NO_DRAFT_MESSAGE);
        assert_eq!(
            navigation.take().as_deref(),
            Some("/issuer-portal/pages/issue.html")
        );
    }

    #[tokio::test]
    async fn test_back_keeps_handoff() {
        let (workflow, repo) = workflow();
        let client = ClientId::new();
        let navigation = NavigationSlot::new();
        workflow
            .submit(client, form(), &notifier(), &navigation)
            .await
            .unwrap();

        workflow.go_back(&navigation).unwrap();
        assert_eq!(
            navigation.take().as_deref(),
            Some("/issuer-portal/pages/issue.html")
        );
        assert!(repo.load_draft(client).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_full_issuance_cycle() {
        let (workflow, repo) = workflow();
        let client = ClientId::new();
        let notifier = notifier();
        let navigation = Arc::new(NavigationSlot::new());

        workflow
            .submit(client, form(), &notifier, &*navigation)
            .await
            .unwrap();
        navigation.take();

        let navigator: Arc<dyn Navigator> = navigation.clone();
        let outcome = workflow
            .confirm_issue(client, notifier.clone(), navigator)
            .await
            .unwrap();

        let IssuanceOutcome::Issued(record) = outcome else {
            panic!("expected an issued credential");
        };
        assert!(record.transaction_ref.starts_with("0x"));
        assert!(record.content_ref.starts_with("Qm"));
        assert_eq!(record.draft.full_name, "Sara Khan");

        let issued = repo.list(client).await.unwrap();
        assert_eq!(issued.len(), 1);
        assert_eq!(issued[0], *record);
        assert_eq!(repo.load_draft(client).await.unwrap(), None);

        let history = notifier.history_since(0);
        let infos: Vec<_> = history
            .iter()
            .filter(|n| n.severity == Severity::Info)
            .map(|n| n.message.as_str())
            .collect();
        let expected: Vec<_> = IssuanceStage::ALL.iter().map(|s| s.announcement()).collect();
        assert_eq!(infos, expected);
        assert_eq!(history.last().unwrap().message, ISSUED_MESSAGE);

        let target = navigation.take().unwrap();
        assert!(target.starts_with("/issuer-portal/pages/preview.html?"));
        assert!(target.contains(&format!("transactionRef={}", record.transaction_ref)));
        assert!(target.contains(&format!("contentRef={}", record.content_ref)));
        assert!(target.contains("subjectName=Sara+Khan"));
    }

    #[tokio::test]
    async fn test_issuing_twice_appends() {
        let (workflow, repo) = workflow();
        let client = ClientId::new();
        let navigation = Arc::new(NavigationSlot::new());

        for _ in 0..2 {
            workflow
                .submit(client, form(), &notifier(), &*navigation)
                .await
                .unwrap();
            workflow
                .confirm_issue(client, notifier(), navigation.clone())
                .await
                .unwrap();
        }

        let issued = repo.list(client).await.unwrap();
        assert_eq!(issued.len(), 2);
        assert_ne!(issued[0].transaction_ref, issued[1].transaction_ref);
        assert!(repo.list(ClientId::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_confirm_without_handoff_aborts() {
        let (workflow, repo) = workflow();
        let client = ClientId::new();
        let notifier = notifier();
        let navigation = Arc::new(NavigationSlot::new());

        let outcome = workflow
            .confirm_issue(client, notifier.clone(), navigation.clone())
            .await
            .unwrap();

        assert_eq!(outcome, IssuanceOutcome::Aborted);
        assert!(repo.list(client).await.unwrap().is_empty());
        assert_eq!(notifier.current().unwrap().message, NO_DRAFT_MESSAGE);
        assert_eq!(
            navigation.take().as_deref(),
            Some("/issuer-portal/pages/issue.html")
        );
    }

    #[tokio::test]
    async fn test_failed_stage_keeps_handoff() {
        let (workflow, repo) = workflow_with(FailingBackend);
        let client = ClientId::new();
        let notifier = notifier();
        let navigation = Arc::new(NavigationSlot::new());

        workflow
            .submit(client, form(), &notifier, &*navigation)
            .await
            .unwrap();
        navigation.take();

        let err = workflow
            .confirm_issue(client, notifier.clone(), navigation.clone())
            .await
            .unwrap_err();

        assert!(matches!(err, IssuerError::Backend(_)));
        assert!(repo.list(client).await.unwrap().is_empty());
        assert!(repo.load_draft(client).await.unwrap().is_some());
        assert_eq!(navigation.peek(), None);

        let infos = notifier
            .history_since(0)
            .iter()
            .filter(|n| n.severity == Severity::Info)
            .count();
        assert_eq!(infos, 3);
        assert_eq!(
            notifier.current().unwrap().message,
            "Credential issuance failed"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_result_redirect_waits() {
        let config = IssuerConfig::default();
        let repo = Arc::new(StoredIssuerRepository::new(MemoryStore::new(), "d", "i"));
        let workflow = IssuanceWorkflow::new(
            repo,
            Arc::new(SimulatedBackend::new(config.stage_delay)),
            Arc::new(config),
        );
        let client = ClientId::new();
        let navigation = Arc::new(NavigationSlot::new());
        workflow
            .submit(client, form(), &notifier(), &*navigation)
            .await
            .unwrap();

        let started = tokio::time::Instant::now();
        workflow
            .confirm_issue(client, notifier(), navigation.clone())
            .await
            .unwrap();

        // four stages plus the redirect delay
        assert!(started.elapsed() >= Duration::from_secs(5));
        assert!(navigation.peek().is_some());
    }
}

#[cfg(test)]
mod storage_tests {
    use crate::domain::entities::{CredentialDraft, IssuedCredentialRecord};
    use crate::domain::repository::CredentialRepository;
    use crate::domain::value_objects::LedgerRefs;
    use crate::error::IssuerError;
    use crate::infra::storage::StoredIssuerRepository;
    use chrono::Utc;
    use kernel::id::ClientId;
    use platform::storage::{KeyValueStore, MemoryStore, StorageKey};

    #[tokio::test]
    async fn test_corrupt_history_starts_over() {
        let store = MemoryStore::new();
        let client = ClientId::new();
        store
            .set(
                &StorageKey::persistent(client, "issued_credentials"),
                "{broken".to_string(),
            )
            .await
            .unwrap();

        let repo = StoredIssuerRepository::new(store, "credential_preview_data", "issued_credentials");
        let records: Vec<IssuedCredentialRecord> = repo.list(client).await.unwrap();
        assert!(records.is_empty());
    }

    fn record(transaction_ref: &str) -> IssuedCredentialRecord {
        let draft = CredentialDraft {
            student_did: "did:example:abc123".to_string(),
            student_email: String::new(),
            full_name: "Ali Raza".to_string(),
            student_id: String::new(),
            degree_title: "BBA".to_string(),
            major: String::new(),
            gpa: "3.5".to_string(),
            graduation_date: "2024-06-30".to_string(),
            honors: String::new(),
            store_on_chain: true,
            pin_to_ipfs: false,
            expiration_date: String::new(),
        };
        let refs = LedgerRefs {
            transaction_ref: transaction_ref.to_string(),
            content_ref: "Qmabc".to_string(),
        };
        IssuedCredentialRecord::issue(draft, refs, Utc::now())
    }

    #[tokio::test]
    async fn test_append_keeps_unreadable_history() {
        let store = MemoryStore::new();
        let client = ClientId::new();
        let key = StorageKey::persistent(client, "issued_credentials");
        let repo =
            StoredIssuerRepository::new(store.clone(), "credential_preview_data", "issued_credentials");

        repo.append(client, &record("0x1")).await.unwrap();

        // second entry is missing most of its fields
        let mut history: Vec<serde_json::Value> =
            serde_json::from_str(&store.get(&key).await.unwrap().unwrap()).unwrap();
        history.push(serde_json::json!({ "txHash": "0x2" }));
        let stored = serde_json::to_string(&history).unwrap();
        store.set(&key, stored.clone()).await.unwrap();

        let err = repo.append(client, &record("0x3")).await.unwrap_err();
        assert!(matches!(err, IssuerError::Serialization(_)));
        assert_eq!(store.get(&key).await.unwrap(), Some(stored));
    }
}

#[cfg(test)]
mod error_tests {
    use crate::domain::workflow::{InvalidTransition, WorkflowEvent, WorkflowState};
    use crate::error::IssuerError;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use kernel::error::{app_error::AppError, kind::ErrorKind};

    #[test]
    fn test_status_codes() {
        assert_eq!(
            IssuerError::Validation("x".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            IssuerError::Backend("x".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        let transition = InvalidTransition {
            from: WorkflowState::Issued,
            event: WorkflowEvent::Back,
        };
        assert_eq!(
            IssuerError::from(transition).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            IssuerError::Internal("x".into()).kind(),
            ErrorKind::InternalServerError
        );
    }

    #[test]
    fn test_server_errors_hide_details() {
        let app: AppError = IssuerError::Internal("db password leaked".into()).into();
        assert_eq!(app.message(), "Something went wrong");

        let app: AppError = IssuerError::Validation("Please fill all required fields".into()).into();
        assert_eq!(app.message(), "Please fill all required fields");
        assert_eq!(app.kind(), ErrorKind::UnprocessableEntity);
    }

    #[test]
    fn test_into_response() {
        let response = IssuerError::Validation("bad".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
