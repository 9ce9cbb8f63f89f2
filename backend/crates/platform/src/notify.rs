//! Notification Service
//!
//! Per-client, transient user feedback:
//! - at most one visible notification, replaced by the next one and
//!   auto-dismissed after [`NotifyConfig::dismiss_after`]
//! - yes/no confirmation prompts that suspend the caller until the page
//!   answers them
//!
//! Pages poll the current notification (or the history since the last
//! sequence number they saw) and the pending prompts.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use kernel::id::{ClientId, PromptId};
use serde::{Deserialize, Serialize};
use tokio::sync::{oneshot, watch};
use tokio::time::Instant;

/// Notification service configuration
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// How long a notification stays visible
    pub dismiss_after: Duration,
    /// Notifications kept for pages that poll with `after`
    pub history_len: usize,
    /// Clients untouched for this long lose their notifier and transient data
    pub idle_after: Duration,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            dismiss_after: Duration::from_secs(5),
            history_len: 64,
            idle_after: Duration::from_secs(30 * 60),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// One displayed message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Increasing per client, starting at 1
    pub seq: u64,
    pub message: String,
    pub severity: Severity,
    pub shown_at_ms: i64,
}

/// Text of a yes/no prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl ConfirmPrompt {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: "Confirm".to_string(),
            cancel_label: "Cancel".to_string(),
        }
    }

    pub fn with_labels(mut self, confirm: impl Into<String>, cancel: impl Into<String>) -> Self {
        self.confirm_label = confirm.into();
        self.cancel_label = cancel.into();
        self
    }
}

/// A prompt waiting for the page's answer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingPrompt {
    pub id: PromptId,
    #[serde(flatten)]
    pub prompt: ConfirmPrompt,
}

/// Anything that can obtain a yes/no decision from the user
#[trait_variant::make(Confirmer: Send)]
pub trait LocalConfirmer {
    /// Resolves `true` only on an explicit yes. Never fails.
    async fn confirm(&self, prompt: ConfirmPrompt) -> bool;
}

/// A decision the browser already made with its native `confirm()`
///
/// Used when the page cannot show the richer dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeConfirm(pub bool);

impl Confirmer for NativeConfirm {
    async fn confirm(&self, prompt: ConfirmPrompt) -> bool {
        tracing::debug!(title = %prompt.title, confirmed = self.0, "Native confirmation");
        self.0
    }
}

struct PromptEntry {
    id: PromptId,
    prompt: ConfirmPrompt,
    reply: oneshot::Sender<bool>,
}

/// Notification slot and prompt stack of one client
pub struct Notifier {
    config: NotifyConfig,
    slot: Arc<watch::Sender<Option<Notification>>>,
    history: Mutex<VecDeque<Notification>>,
    next_seq: AtomicU64,
    prompts: Mutex<Vec<PromptEntry>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // The guarded data stays consistent even if a holder panicked
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

fn dismiss_if_current(slot: &watch::Sender<Option<Notification>>, seq: u64) -> bool {
    slot.send_if_modified(|current| match current {
        Some(shown) if shown.seq == seq => {
            *current = None;
            true
        }
        _ => false,
    })
}

impl Notifier {
    pub fn new(config: NotifyConfig) -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            config,
            slot: Arc::new(slot),
            history: Mutex::new(VecDeque::new()),
            next_seq: AtomicU64::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Show `message`, replacing whatever is visible
    pub fn notify(&self, message: impl Into<String>, severity: Severity) -> Notification {
        let notification = Notification {
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed) + 1,
            message: message.into(),
            severity,
            shown_at_ms: now_ms(),
        };

        match severity {
            Severity::Error | Severity::Warning => tracing::warn!(
                seq = notification.seq,
                severity = severity.as_str(),
                message = %notification.message,
                "Notification"
            ),
            _ => tracing::debug!(
                seq = notification.seq,
                severity = severity.as_str(),
                message = %notification.message,
                "Notification"
            ),
        }

        self.slot.send_replace(Some(notification.clone()));

        {
            let mut history = lock(&self.history);
            history.push_back(notification.clone());
            while history.len() > self.config.history_len {
                history.pop_front();
            }
        }

        self.schedule_dismiss(notification.seq);
        notification
    }

    fn schedule_dismiss(&self, seq: u64) {
        let slot = Arc::clone(&self.slot);
        let delay = self.config.dismiss_after;

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    dismiss_if_current(&slot, seq);
                });
            }
            Err(_) => tracing::debug!(seq, "No runtime; notification stays until replaced"),
        }
    }

    /// Close a notification early. `false` if it is no longer visible.
    pub fn dismiss(&self, seq: u64) -> bool {
        dismiss_if_current(&self.slot, seq)
    }

    pub fn current(&self) -> Option<Notification> {
        self.slot.borrow().clone()
    }

    /// Notifications with `seq > after`, oldest first
    pub fn history_since(&self, after: u64) -> Vec<Notification> {
        lock(&self.history)
            .iter()
            .filter(|n| n.seq > after)
            .cloned()
            .collect()
    }

    /// Show a prompt and wait for the answer.
    ///
    /// Each call is an independent prompt; overlapping calls stack. If the
    /// prompt goes away unanswered the result is `false`.
    pub async fn confirm(&self, prompt: ConfirmPrompt) -> bool {
        self.await_answer(prompt).await
    }

    async fn await_answer(&self, prompt: ConfirmPrompt) -> bool {
        let (reply, answer) = oneshot::channel();
        let id = PromptId::new();

        tracing::info!(prompt_id = %id, title = %prompt.title, "Awaiting confirmation");
        lock(&self.prompts).push(PromptEntry { id, prompt, reply });

        // Removes the prompt if this future is dropped before an answer
        let _guard = PromptGuard { notifier: self, id };

        let confirmed = answer.await.unwrap_or(false);
        tracing::info!(prompt_id = %id, confirmed, "Confirmation answered");
        confirmed
    }

    /// Prompts waiting for an answer, in the order they were opened
    pub fn pending_prompts(&self) -> Vec<PendingPrompt> {
        lock(&self.prompts)
            .iter()
            .map(|entry| PendingPrompt {
                id: entry.id,
                prompt: entry.prompt.clone(),
            })
            .collect()
    }

    /// Answer a prompt. `false` if no such prompt is pending.
    pub fn answer(&self, id: PromptId, confirmed: bool) -> bool {
        let entry = {
            let mut prompts = lock(&self.prompts);
            let Some(index) = prompts.iter().position(|entry| entry.id == id) else {
                return false;
            };
            prompts.remove(index)
        };

        // The waiter may be gone already; the prompt is closed either way
        let _ = entry.reply.send(confirmed);
        true
    }

    fn forget_prompt(&self, id: PromptId) {
        lock(&self.prompts).retain(|entry| entry.id != id);
    }
}

impl Confirmer for Notifier {
    async fn confirm(&self, prompt: ConfirmPrompt) -> bool {
        self.await_answer(prompt).await
    }
}

struct PromptGuard<'a> {
    notifier: &'a Notifier,
    id: PromptId,
}

impl Drop for PromptGuard<'_> {
    fn drop(&mut self) {
        self.notifier.forget_prompt(self.id);
    }
}

struct Tracked {
    notifier: Arc<Notifier>,
    last_seen: Instant,
}

/// Hands out the [`Notifier`] of each client
#[derive(Clone, Default)]
pub struct NotifierRegistry {
    config: NotifyConfig,
    notifiers: Arc<Mutex<HashMap<ClientId, Tracked>>>,
}

impl NotifierRegistry {
    pub fn new(config: NotifyConfig) -> Self {
        Self {
            config,
            notifiers: Arc::default(),
        }
    }

    pub fn config(&self) -> &NotifyConfig {
        &self.config
    }

    /// Notifier of `client`, created on first use
    pub fn for_client(&self, client: ClientId) -> Arc<Notifier> {
        let mut notifiers = lock(&self.notifiers);
        let tracked = notifiers.entry(client).or_insert_with(|| Tracked {
            notifier: Arc::new(Notifier::new(self.config.clone())),
            last_seen: Instant::now(),
        });
        tracked.last_seen = Instant::now();
        tracked.notifier.clone()
    }

    /// Notifier of `client` if one exists. Never creates one.
    pub fn get(&self, client: ClientId) -> Option<Arc<Notifier>> {
        let mut notifiers = lock(&self.notifiers);
        let tracked = notifiers.get_mut(&client)?;
        tracked.last_seen = Instant::now();
        Some(tracked.notifier.clone())
    }

    /// Drop notifiers idle for [`NotifyConfig::idle_after`]. A notifier still
    /// held elsewhere (a request waiting on a prompt) is kept.
    /// Returns how many went.
    pub fn evict_idle(&self) -> usize {
        let idle_after = self.config.idle_after;
        let mut notifiers = lock(&self.notifiers);
        let before = notifiers.len();
        notifiers.retain(|_, tracked| {
            tracked.last_seen.elapsed() < idle_after || Arc::strong_count(&tracked.notifier) > 1
        });
        before - notifiers.len()
    }
}
