//! Certificate Renderer
//!
//! Lays out [`CertificateContent`] on a landscape A4 page and encodes it as
//! PDF. The layout is fixed: dark background, a two-tier border and a
//! centred column of text.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::entity::certificate::CertificateContent;
use crate::domain::services::pdf::{DocumentInfo, Font, PageCanvas, Rgb};

/// A4 landscape, in points
pub const PAGE_WIDTH: f32 = 842.0;
pub const PAGE_HEIGHT: f32 = 595.0;

const BACKGROUND: Rgb = Rgb::from_hex(0x111827);
const MAGENTA: Rgb = Rgb::from_hex(0xFF00FF);
const CYAN: Rgb = Rgb::from_hex(0x00CED1);
const WHITE: Rgb = Rgb::from_hex(0xFFFFFF);
const GRAY: Rgb = Rgb::from_hex(0x9CA3AF);
const LIGHT: Rgb = Rgb::from_hex(0xE5E7EB);

const OUTER_BORDER_INSET: f32 = 20.0;
const OUTER_BORDER_WIDTH: f32 = 4.0;
const INNER_BORDER_INSET: f32 = 32.0;
const INNER_BORDER_WIDTH: f32 = 1.5;

const NAME_SIZE: f32 = 34.0;
const NAME_MIN_SIZE: f32 = 14.0;
/// Horizontal room the applicant name may take before it is scaled down
const NAME_MAX_WIDTH: f32 = PAGE_WIDTH - 2.0 * 80.0;

const BODY_BASELINES: [f32; 3] = [320.0, 342.0, 364.0];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("Certificate field '{0}' is empty")]
    EmptyField(&'static str),

    #[error("Certificate field '{0}' contains control characters")]
    ControlCharacter(&'static str),
}

/// Produces the certificate payload attached to the confirmation e-mail
pub trait CertificateRenderer: Send + Sync {
    /// Render the certificate for `name` at `now`
    ///
    /// `role` is the role code; it is printed capitalized.
    fn render(
        &self,
        name: &str,
        role: &str,
        organization: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<u8>, RenderError>;
}

/// Renders certificates as single-page PDF documents
#[derive(Debug, Clone, Default)]
pub struct PdfCertificateRenderer;

impl PdfCertificateRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl CertificateRenderer for PdfCertificateRenderer {
    fn render(
        &self,
        name: &str,
        role: &str,
        organization: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<u8>, RenderError> {
        check_field("name", name)?;
        check_field("role", role)?;
        check_field("organization", organization)?;

        let content = CertificateContent::compose(name, role, organization, now);
        let canvas = layout(&content);

        Ok(canvas.into_pdf(&DocumentInfo {
            title: format!("Certificate of Participation - {}", content.name),
            author: content.footer[0].clone(),
            created_at: now,
        }))
    }
}

fn check_field(field: &'static str, value: &str) -> Result<(), RenderError> {
    if value.trim().is_empty() {
        return Err(RenderError::EmptyField(field));
    }
    if value.chars().any(char::is_control) {
        return Err(RenderError::ControlCharacter(field));
    }
    Ok(())
}

fn layout(content: &CertificateContent) -> PageCanvas {
    let mut page = PageCanvas::new(PAGE_WIDTH, PAGE_HEIGHT);

    page.fill_rect(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT, BACKGROUND);
    border(&mut page, OUTER_BORDER_INSET, OUTER_BORDER_WIDTH, MAGENTA);
    border(&mut page, INNER_BORDER_INSET, INNER_BORDER_WIDTH, CYAN);

    page.centered_text(&content.title, Font::Bold, 40.0, 110.0, CYAN);
    page.centered_text(&content.subtitle, Font::Bold, 18.0, 140.0, WHITE);
    page.centered_text(&content.preamble, Font::Regular, 16.0, 190.0, GRAY);
    page.centered_text(
        &content.name,
        Font::Bold,
        name_size(&content.name),
        240.0,
        MAGENTA,
    );
    page.centered_text(&content.affiliation, Font::Oblique, 18.0, 275.0, WHITE);

    for (line, baseline) in content.body.iter().zip(BODY_BASELINES) {
        page.centered_text(line, Font::Regular, 15.0, baseline, LIGHT);
    }

    page.centered_text(&content.issued_on, Font::Regular, 13.0, 420.0, GRAY);
    page.centered_text(&content.footer[0], Font::Bold, 14.0, 505.0, CYAN);
    page.centered_text(&content.footer[1], Font::Oblique, 11.0, 523.0, GRAY);

    page
}

fn border(page: &mut PageCanvas, inset: f32, width: f32, color: Rgb) {
    page.stroke_rect(
        inset,
        inset,
        page.width() - 2.0 * inset,
        page.height() - 2.0 * inset,
        width,
        color,
    );
}

/// Long names are scaled down to fit between the borders
fn name_size(name: &str) -> f32 {
    let width = Font::Bold.text_width(name, NAME_SIZE);
    if width <= NAME_MAX_WIDTH {
        return NAME_SIZE;
    }
    (NAME_SIZE * NAME_MAX_WIDTH / width).max(NAME_MIN_SIZE)
}
