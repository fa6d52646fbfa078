//! Signup Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use platform::mail::RelayClient;

use crate::application::config::SignupConfig;
use crate::domain::gateway::{CertificateStore, Clock, EmailRelay};
use crate::domain::repository::FormSessionRepository;
use crate::domain::services::{CertificateRenderer, PdfCertificateRenderer};
use crate::infra::{FsCertificateStore, InMemoryFormSessionRepository, SystemClock};
use crate::presentation::handlers::{self, SignupAppState};

type DefaultState = SignupAppState<InMemoryFormSessionRepository, RelayClient, FsCertificateStore>;

/// Create the signup router with in-memory sessions, the HTTP relay client,
/// certificates on disk and the PDF renderer
pub fn signup_router(
    repo: InMemoryFormSessionRepository,
    relay: RelayClient,
    config: SignupConfig,
) -> Router {
    let store = FsCertificateStore::new(config.certificates_dir.clone());
    let state: DefaultState = SignupAppState {
        repo: Arc::new(repo),
        relay: Arc::new(relay),
        store: Arc::new(store),
        renderer: Arc::new(PdfCertificateRenderer::new()),
        clock: Arc::new(SystemClock),
        config: Arc::new(config),
    };

    routes(state)
}

/// Create a generic signup router for any backend implementation
pub fn signup_router_generic<R, E, S>(
    repo: R,
    relay: E,
    store: S,
    renderer: Arc<dyn CertificateRenderer>,
    clock: Arc<dyn Clock>,
    config: SignupConfig,
) -> Router
where
    R: FormSessionRepository + Send + Sync + 'static,
    E: EmailRelay + Send + Sync + 'static,
    S: CertificateStore + Send + Sync + 'static,
{
    routes(SignupAppState {
        repo: Arc::new(repo),
        relay: Arc::new(relay),
        store: Arc::new(store),
        renderer,
        clock,
        config: Arc::new(config),
    })
}

fn routes<R, E, S>(state: SignupAppState<R, E, S>) -> Router
where
    R: FormSessionRepository + Send + Sync + 'static,
    E: EmailRelay + Send + Sync + 'static,
    S: CertificateStore + Send + Sync + 'static,
{
    Router::new()
        .route("/sessions", post(handlers::create_session::<R, E, S>))
        .route(
            "/sessions/{id}",
            get(handlers::get_session::<R, E, S>)
                .patch(handlers::update_session::<R, E, S>)
                .delete(handlers::delete_session::<R, E, S>),
        )
        .route(
            "/sessions/{id}/submit",
            post(handlers::submit_application::<R, E, S>),
        )
        .route(
            "/sessions/{id}/certificate",
            get(handlers::download_certificate::<R, E, S>),
        )
        .route("/roles", get(handlers::list_roles))
        .with_state(state)
}
