//! Domain Services
//!
//! Certificate rendering. Pure: output depends only on the arguments.

pub mod certificate_renderer;
pub mod pdf;

pub use certificate_renderer::{CertificateRenderer, PdfCertificateRenderer, RenderError};
