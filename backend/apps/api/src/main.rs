//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors are rendered by the
//! signup crate.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    Router, http,
    http::{Method, header},
};
use signup::{
    FormSessionUseCase, InMemoryFormSessionRepository, RelayConfig, SignupConfig, relay_client,
    signup_router,
};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PORT: u16 = 31113;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,signup=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config()?;
    tracing::info!(
        relay_endpoint = %config.relay_endpoint,
        relay_configured = config.relay.is_complete(),
        certificates_dir = %config.certificates_dir.display(),
        "Signup configuration loaded"
    );

    let relay = relay_client(&config).context("failed to build e-mail relay client")?;
    let repo = InMemoryFormSessionRepository::new();

    spawn_session_sweeper(repo.clone(), config.clone());

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .expose_headers([header::CONTENT_DISPOSITION]);

    // Build router
    let app = Router::new()
        .nest("/api/join", signup_router(repo, relay, config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port = match env::var("API_PORT") {
        Ok(port) => port
            .parse()
            .with_context(|| format!("API_PORT is not a valid port: {port}"))?,
        Err(_) => DEFAULT_PORT,
    };
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the signup configuration from the environment
///
/// Relay credentials may be missing; submissions then fail with the
/// generic error notification instead of the server refusing to start.
fn load_config() -> anyhow::Result<SignupConfig> {
    let mut config = if cfg!(debug_assertions) {
        SignupConfig::development()
    } else {
        SignupConfig::default()
    };

    config.relay = RelayConfig::new(
        env::var("EMAIL_RELAY_PUBLIC_KEY").unwrap_or_default(),
        env::var("EMAIL_RELAY_SERVICE_ID").unwrap_or_default(),
        env::var("EMAIL_RELAY_TEMPLATE_ID").unwrap_or_default(),
    );

    if let Ok(endpoint) = env::var("EMAIL_RELAY_ENDPOINT") {
        config.relay_endpoint = endpoint;
    }
    if let Ok(secs) = env::var("EMAIL_RELAY_TIMEOUT_SECS") {
        let secs: u64 = secs
            .parse()
            .with_context(|| format!("EMAIL_RELAY_TIMEOUT_SECS is not a number: {secs}"))?;
        // 0 disables the timeout
        config.relay_timeout = (secs > 0).then(|| Duration::from_secs(secs));
    }
    if let Ok(dir) = env::var("CERTIFICATES_DIR") {
        config.certificates_dir = dir.into();
    }
    if let Ok(secs) = env::var("SESSION_IDLE_TTL_SECS") {
        let secs: u64 = secs
            .parse()
            .with_context(|| format!("SESSION_IDLE_TTL_SECS is not a number: {secs}"))?;
        config.session_idle_ttl = Duration::from_secs(secs);
    }

    Ok(config)
}

/// Periodically drop idle form sessions
///
/// Errors are logged and the sweep continues on the next tick.
fn spawn_session_sweeper(repo: InMemoryFormSessionRepository, config: SignupConfig) {
    let interval = config.session_sweep_interval;
    let sessions = FormSessionUseCase::new(Arc::new(repo), Arc::new(config));

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(e) = sessions.cleanup_idle().await {
                tracing::warn!(error = %e, "Form session cleanup failed, continuing anyway");
            }
        }
    });
}
