//! Infrastructure Layer
//!
//! Storage implementations and external service integrations.

pub mod certificate_store;
pub mod clock;
pub mod email_relay;
pub mod memory;

pub use certificate_store::FsCertificateStore;
pub use clock::SystemClock;
pub use memory::InMemoryFormSessionRepository;
