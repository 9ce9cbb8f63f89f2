//! Portal configuration from the environment

use std::env;
use std::net::SocketAddr;

use anyhow::{Context, bail};
use auth::AuthConfig;
use base64::Engine;
use base64::engine::general_purpose;
use issuer::IssuerConfig;
use platform::client_scope::ClientScopeConfig;
use platform::notify::NotifyConfig;

pub const DEFAULT_ADDR: &str = "0.0.0.0:31113";
pub const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

#[derive(Debug, Clone, Default)]
pub struct PortalConfig {
    pub auth: AuthConfig,
    pub issuer: IssuerConfig,
    pub notify: NotifyConfig,
    pub client_scope: ClientScopeConfig,
}

impl PortalConfig {
    /// Random client secret, cookie usable over plain HTTP
    pub fn development() -> Self {
        Self {
            client_scope: ClientScopeConfig::development(),
            ..Self::default()
        }
    }

    /// Read `PORTAL_MARKER`, `PORTAL_PAGES_BASE` and `PORTAL_CLIENT_SECRET`.
    ///
    /// Release builds refuse to start without a client secret.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = if cfg!(debug_assertions) {
            Self::development()
        } else {
            let secret_b64 = env::var("PORTAL_CLIENT_SECRET")
                .context("PORTAL_CLIENT_SECRET must be set in production")?;
            Self {
                client_scope: ClientScopeConfig {
                    secret: decode_secret(&secret_b64)?,
                    ..ClientScopeConfig::default()
                },
                ..Self::default()
            }
        };

        if let Ok(marker) = env::var("PORTAL_MARKER") {
            config.auth = AuthConfig::for_site_marker(marker);
        }
        if let Ok(base) = env::var("PORTAL_PAGES_BASE") {
            config.issuer = config.issuer.with_pages_base(base);
        }

        Ok(config)
    }
}

/// 32-byte HMAC key from standard base64
pub fn decode_secret(secret_b64: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = general_purpose::STANDARD
        .decode(secret_b64.trim())
        .context("PORTAL_CLIENT_SECRET is not valid base64")?;
    let Ok(secret) = <[u8; 32]>::try_from(bytes.as_slice()) else {
        bail!(
            "PORTAL_CLIENT_SECRET must decode to 32 bytes, got {}",
            bytes.len()
        );
    };
    Ok(secret)
}

pub fn listen_addr() -> anyhow::Result<SocketAddr> {
    let addr = env::var("PORTAL_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    addr.parse()
        .with_context(|| format!("PORTAL_ADDR is not a socket address: {addr}"))
}

pub fn frontend_origins() -> String {
    env::var("FRONTEND_ORIGINS").unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_secret() {
        let encoded = general_purpose::STANDARD.encode([7u8; 32]);
        assert_eq!(decode_secret(&encoded).unwrap(), [7u8; 32]);

        let short = general_purpose::STANDARD.encode([7u8; 16]);
        assert!(decode_secret(&short).is_err());
        assert!(decode_secret("not base64!").is_err());
    }

    #[test]
    fn test_development_config() {
        let config = PortalConfig::development();
        assert!(!config.client_scope.cookie.secure);
        assert_ne!(config.client_scope.secret, [0u8; 32]);
        assert_eq!(config.auth.login_page, "/issuer-portal/pages/login.html");
    }
}
