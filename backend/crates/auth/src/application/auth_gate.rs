//! Auth Gate
//!
//! The single enforcement point for protected pages, plus the logout flow.
//! Pages call [`AuthGate::require_auth`] before producing anything protected
//! and stop when it returns `false`.

use std::sync::Arc;

use kernel::id::ClientId;
use platform::navigation::Navigator;
use platform::notify::{ConfirmPrompt, Confirmer};

use crate::application::config::AuthConfig;
use crate::application::session_store::SessionStore;
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;

pub struct AuthGate<R>
where
    R: SessionRepository + Send + Sync + 'static,
{
    sessions: SessionStore<R>,
    config: Arc<AuthConfig>,
}

impl<R> AuthGate<R>
where
    R: SessionRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self {
            sessions: SessionStore::new(repo),
            config,
        }
    }

    pub fn sessions(&self) -> &SessionStore<R> {
        &self.sessions
    }

    /// `true` if the client is signed in. Otherwise navigates to the login
    /// page and returns `false`.
    pub async fn require_auth<N>(&self, client: ClientId, navigator: &N) -> bool
    where
        N: Navigator + ?Sized,
    {
        if self.sessions.is_authenticated(client).await {
            return true;
        }

        tracing::debug!(client_id = %client, "Unauthenticated; redirecting to login");
        navigator.navigate(self.config.login_page.clone());
        false
    }

    /// Ask for confirmation, then clear the session and leave for the site
    /// index. Returns whether the logout happened.
    pub async fn logout<C, N>(
        &self,
        client: ClientId,
        location: &str,
        confirmer: &C,
        navigator: &N,
    ) -> AuthResult<bool>
    where
        C: Confirmer + Sync,
        N: Navigator + ?Sized,
    {
        if !confirmer.confirm(logout_prompt()).await {
            tracing::debug!(client_id = %client, "Logout cancelled");
            return Ok(false);
        }

        self.sessions.clear(client).await?;
        navigator.navigate(self.logout_target(location));
        Ok(true)
    }

    pub fn logout_target(&self, location: &str) -> String {
        logout_target(location, &self.config.site_marker)
    }
}

/// The logout confirmation dialog
pub fn logout_prompt() -> ConfirmPrompt {
    ConfirmPrompt::new("Logout", "Are you sure you want to logout?").with_labels("Logout", "Cancel")
}

/// Where to go after logout from `location` (a path or a full URL).
///
/// With the site marker in the path, the portal root is recomputed so the
/// portal can live under any base path. Otherwise a relative guess is made.
pub fn logout_target(location: &str, site_marker: &str) -> String {
    let pathname = pathname_of(location);
    let marker_root = site_marker.trim_end_matches('/');

    if let Some(index) = pathname.find(site_marker).filter(|_| !marker_root.is_empty()) {
        let root = &pathname[..index + marker_root.len()];
        return format!("{}/index.html", root);
    }

    if pathname.contains("/pages/") {
        "../index.html".to_string()
    } else {
        "index.html".to_string()
    }
}

/// Sidebar key of the page at `location`: last path segment without `.html`
pub fn active_page(location: &str) -> String {
    let pathname = pathname_of(location);
    let last = pathname.rsplit('/').next().unwrap_or_default();
    last.replace(".html", "")
}

/// Path part of a URL or path, without query or fragment
fn pathname_of(location: &str) -> &str {
    let without_origin = match location.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("/", |i| &rest[i..]),
        None => location,
    };
    let end = without_origin
        .find(['?', '#'])
        .unwrap_or(without_origin.len());
    &without_origin[..end]
}
