//! Application Configuration
//!
//! Configuration for the Auth application layer.

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Where unauthenticated requests are sent
    pub login_page: String,
    /// Path segment the portal is mounted under; logout returns to its index
    pub site_marker: String,
    /// Persisted-area key holding the signed-in identity
    pub session_key: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::for_site_marker("/issuer-portal/")
    }
}

impl AuthConfig {
    /// Config for a portal mounted under `marker` (e.g. `/issuer-portal/`)
    pub fn for_site_marker(marker: impl Into<String>) -> Self {
        let mut marker = marker.into();
        if !marker.starts_with('/') {
            marker.insert(0, '/');
        }
        if !marker.ends_with('/') {
            marker.push('/');
        }

        Self {
            login_page: format!("{}pages/login.html", marker),
            site_marker: marker,
            session_key: "issuer_user".to_string(),
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::default()
    }
}
