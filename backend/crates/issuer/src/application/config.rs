//! Application Configuration
//!
//! Configuration for the issuer application layer.

use std::time::Duration;

/// Issuer application configuration
#[derive(Debug, Clone)]
pub struct IssuerConfig {
    /// Time each simulated issuance stage takes
    pub stage_delay: Duration,
    /// Pause between "Refreshing data..." and the new render
    pub refresh_delay: Duration,
    /// Pause while the export file is "prepared"
    pub export_delay: Duration,
    /// Pause between the success notification and the result page
    pub redirect_delay: Duration,
    /// Prefix of the portal's page URLs
    pub pages_base: String,
    /// Block explorer transaction URL prefix
    pub explorer_tx_url: String,
    /// Transient-area key of the form-to-preview handoff
    pub draft_key: String,
    /// Persisted-area key of the issued credentials
    pub issued_key: String,
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            stage_delay: Duration::from_secs(1),
            refresh_delay: Duration::from_millis(500),
            export_delay: Duration::from_secs(1),
            redirect_delay: Duration::from_secs(1),
            pages_base: "/issuer-portal/pages/".to_string(),
            explorer_tx_url: "https://polygonscan.com/tx/".to_string(),
            draft_key: "credential_preview_data".to_string(),
            issued_key: "issued_credentials".to_string(),
        }
    }
}

impl IssuerConfig {
    /// Create config for development
    pub fn development() -> Self {
        Self::default()
    }

    /// Same pages and keys, no artificial delays
    pub fn without_delays() -> Self {
        Self {
            stage_delay: Duration::ZERO,
            refresh_delay: Duration::ZERO,
            export_delay: Duration::ZERO,
            redirect_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Pages under a different base path (e.g. `/campus/issuer-portal/pages/`)
    pub fn with_pages_base(mut self, base: impl Into<String>) -> Self {
        let mut base = base.into();
        if !base.ends_with('/') {
            base.push('/');
        }
        self.pages_base = base;
        self
    }

    /// URL of a portal page
    pub fn page(&self, name: &str) -> String {
        format!("{}{}", self.pages_base, name)
    }

    pub fn explorer_url(&self, transaction_ref: &str) -> String {
        format!("{}{}", self.explorer_tx_url, transaction_ref)
    }

    pub fn stage_delay_ms(&self) -> i64 {
        self.stage_delay.as_millis() as i64
    }
}
