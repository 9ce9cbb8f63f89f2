//! Client Scope
//!
//! Every request belongs to one browser client. The client is identified by
//! an HMAC-signed cookie minted on first contact; its id scopes the storage
//! areas, notifications and prompts of that browser.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::Response;
use kernel::id::ClientId;

use crate::cookie::{CookieConfig, extract_cookie};
use crate::crypto::{random_secret, sign_token, verify_token};

/// Client scope configuration
#[derive(Debug, Clone)]
pub struct ClientScopeConfig {
    pub cookie: CookieConfig,
    /// HMAC key for the cookie token
    pub secret: [u8; 32],
}

/// Secure cookie signed with a fresh random secret
impl Default for ClientScopeConfig {
    fn default() -> Self {
        Self {
            cookie: CookieConfig::default(),
            secret: random_secret(),
        }
    }
}

impl ClientScopeConfig {
    /// Random secret, cookie usable over plain HTTP
    pub fn development() -> Self {
        let mut config = Self::default();
        config.cookie.secure = false;
        config
    }
}

/// The browser client a request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientScope(pub ClientId);

impl ClientScope {
    pub fn id(&self) -> ClientId {
        self.0
    }
}

pub fn issue_client_token(config: &ClientScopeConfig, client_id: ClientId) -> String {
    sign_token(&config.secret, client_id.as_bytes())
}

pub fn verify_client_token(config: &ClientScopeConfig, token: &str) -> Option<ClientId> {
    let payload = verify_token(&config.secret, token, 16)?;
    let bytes: [u8; 16] = payload.try_into().ok()?;
    Some(ClientId::from_bytes(bytes))
}

/// Middleware that attaches a [`ClientScope`] to every request
///
/// A missing or forged cookie gets a fresh scope; the new cookie is set on
/// the response.
pub async fn assign_client_scope(
    State(config): State<Arc<ClientScopeConfig>>,
    mut req: Request,
    next: Next,
) -> Response {
    let existing = extract_cookie(req.headers(), &config.cookie.name)
        .and_then(|token| verify_client_token(&config, &token));

    let (client_id, minted) = match existing {
        Some(id) => (id, false),
        None => (ClientId::new(), true),
    };

    req.extensions_mut().insert(ClientScope(client_id));

    let mut response = next.run(req).await;

    if minted {
        let token = issue_client_token(&config, client_id);
        match config.cookie.set_cookie_header(&token) {
            Some(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
                tracing::debug!(client_id = %client_id, "Assigned new client scope");
            }
            None => tracing::error!(client_id = %client_id, "Client scope cookie is not a valid header"),
        }
    }

    response
}

impl<S> FromRequestParts<S> for ClientScope
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<ClientScope>().copied().ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            "client scope middleware is not installed",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use tower::ServiceExt;

    fn app(config: Arc<ClientScopeConfig>) -> Router {
        Router::new()
            .route("/", get(|scope: ClientScope| async move { scope.id().to_string() }))
            .layer(from_fn_with_state(config, assign_client_scope))
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_token_roundtrip() {
        let config = ClientScopeConfig::default();
        let id = ClientId::new();
        let token = issue_client_token(&config, id);
        assert_eq!(verify_client_token(&config, &token), Some(id));

        let other = ClientScopeConfig::default();
        assert_eq!(verify_client_token(&other, &token), None);
    }

    #[test]
    fn test_default_secret_is_random() {
        let a = ClientScopeConfig::default();
        let b = ClientScopeConfig::default();
        assert_ne!(a.secret, [0u8; 32]);
        assert_ne!(a.secret, b.secret);
        assert!(a.cookie.secure);
    }

    #[tokio::test]
    async fn test_first_request_mints_cookie() {
        let config = Arc::new(ClientScopeConfig::development());
        let response = app(config.clone())
            .oneshot(HttpRequest::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("cookie should be set")
            .to_str()
            .unwrap()
            .to_string();
        assert!(set_cookie.starts_with("portal_client="));

        let token = set_cookie
            .trim_start_matches("portal_client=")
            .split(';')
            .next()
            .unwrap();
        let id = body_string(response).await;
        assert_eq!(
            verify_client_token(&config, token).map(|c| c.to_string()),
            Some(id)
        );
    }

    #[tokio::test]
    async fn test_known_cookie_keeps_scope() {
        let config = Arc::new(ClientScopeConfig::development());
        let id = ClientId::new();
        let token = issue_client_token(&config, id);

        let response = app(config)
            .oneshot(
                HttpRequest::get("/")
                    .header(header::COOKIE, format!("portal_client={}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(body_string(response).await, id.to_string());
    }

    #[tokio::test]
    async fn test_forged_cookie_gets_new_scope() {
        let config = Arc::new(ClientScopeConfig::development());
        let response = app(config)
            .oneshot(
                HttpRequest::get("/")
                    .header(header::COOKIE, "portal_client=forged")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.headers().get(header::SET_COOKIE).is_some());
    }
}
