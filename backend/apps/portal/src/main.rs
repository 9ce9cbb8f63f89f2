//! Portal Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use axum::http::{self, Method, header};
use portal::build_router;
use portal::config::{PortalConfig, frontend_origins, listen_addr};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "portal=info,auth=info,issuer=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PortalConfig::from_env()?;
    tracing::info!(
        login_page = %config.auth.login_page,
        pages_base = %config.issuer.pages_base,
        stage_delay_ms = config.issuer.stage_delay_ms(),
        "Portal configured"
    );

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = frontend_origins()
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .expose_headers([header::LOCATION, header::CONTENT_DISPOSITION])
        .allow_credentials(true);

    // Build router
    let app = build_router(config)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = listen_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
