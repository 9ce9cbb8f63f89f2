//! Navigation
//!
//! Components never build HTTP redirects themselves. They tell a
//! [`Navigator`] where the page should go next and the presentation layer
//! turns the recorded target into a `303 See Other`.

use std::sync::{Arc, Mutex};

use axum::response::{IntoResponse, Redirect, Response};

/// Receives "go to this page" requests
pub trait Navigator: Send + Sync {
    fn navigate(&self, target: String);
}

impl<N: Navigator + ?Sized> Navigator for Arc<N> {
    fn navigate(&self, target: String) {
        (**self).navigate(target)
    }
}

/// Records the most recent navigation target (last call wins)
#[derive(Debug, Default)]
pub struct NavigationSlot {
    target: Mutex<Option<String>>,
}

impl NavigationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded target, leaving the slot empty
    pub fn take(&self) -> Option<String> {
        self.target.lock().ok().and_then(|mut slot| slot.take())
    }

    pub fn peek(&self) -> Option<String> {
        self.target.lock().ok().and_then(|slot| slot.clone())
    }

    /// Redirect to the recorded target, or `fallback` if nothing was recorded
    pub fn into_response_or<F>(self, fallback: F) -> Response
    where
        F: IntoResponse,
    {
        match self.take() {
            Some(target) => see_other(&target),
            None => fallback.into_response(),
        }
    }
}

impl Navigator for NavigationSlot {
    fn navigate(&self, target: String) {
        tracing::debug!(target = %target, "Navigation requested");
        match self.target.lock() {
            Ok(mut slot) => *slot = Some(target),
            Err(e) => tracing::error!(error = %e, "Navigation slot poisoned"),
        }
    }
}

/// `303 See Other` to `target`
pub fn see_other(target: &str) -> Response {
    Redirect::to(target).into_response()
}
