//! PlantTech Join Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Form, certificate and notification entities, value objects,
//!   certificate rendering, repository and gateway traits
//! - `application/` - Use cases
//! - `infra/` - In-memory sessions, filesystem certificates, relay binding
//! - `presentation/` - HTTP handlers
//!
//! ## Submission Model
//! - One form per session; at most one submission in flight per session
//! - A submission either delivers the certificate through the e-mail relay
//!   or fails as a whole; the applicant sees one of two fixed messages
//! - On success the certificate is saved locally under the session and the
//!   form is reset; on failure the form is kept for a retry

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{RelayConfig, SignupConfig};
pub use application::form_session::FormSessionUseCase;
pub use application::submit_application::SubmitApplicationUseCase;
pub use error::{SignupError, SignupResult};
pub use infra::email_relay::relay_client;
pub use infra::{FsCertificateStore, InMemoryFormSessionRepository, SystemClock};
pub use presentation::router::{signup_router, signup_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::application_form::*;
    pub use crate::domain::entity::notification::*;
    pub use crate::domain::entity::submission::*;
    pub use crate::presentation::dto::*;
}
