//! Cookie handling for the client-scope cookie

use axum::http::{HeaderMap, HeaderValue, header};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes of the client-scope cookie
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    /// Only sent over HTTPS
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
    /// `None` makes it a browser-session cookie
    pub max_age_secs: Option<u64>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "portal_client".to_string(),
            secure: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            // persisted storage outlives tabs, so the scope does too
            max_age_secs: Some(365 * 24 * 3600),
        }
    }
}

impl CookieConfig {
    /// `Set-Cookie` value carrying `token`. Always `HttpOnly`: pages never
    /// read the token themselves.
    pub fn set_cookie(&self, token: &str) -> String {
        let mut cookie = format!(
            "{}={}; HttpOnly; SameSite={}; Path={}",
            self.name,
            token,
            self.same_site.as_str(),
            self.path
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        if let Some(max_age) = self.max_age_secs {
            cookie.push_str(&format!("; Max-Age={}", max_age));
        }
        cookie
    }

    /// [`set_cookie`](Self::set_cookie) as a header value; `None` if `token`
    /// has characters a header cannot carry
    pub fn set_cookie_header(&self, token: &str) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.set_cookie(token)).ok()
    }
}

/// Value of cookie `name`, looking through every `Cookie` header
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then(|| value.to_string())
        })
}
