//! Certificate Entity
//!
//! The text of a participation certificate and the name it is saved under.
//! Content depends only on `(name, organization, role, issued_at)`.

use chrono::{DateTime, Utc};

use crate::domain::value_object::applicant_role::capitalize;

pub const CERTIFICATE_TITLE: &str = "CERTIFICATE";
pub const CERTIFICATE_SUBTITLE: &str = "OF PARTICIPATION";
pub const CERTIFICATE_PREAMBLE: &str = "This is to certify that";
pub const CERTIFICATE_FOOTER: [&str; 2] = ["PlantTech", "The Future of Plant Communication"];

const FILE_NAME_PREFIX: &str = "Certificate_";
const FILE_NAME_EXTENSION: &str = ".pdf";
const FILE_NAME_SEPARATOR: char = '_';

/// Every line printed on the certificate, top to bottom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateContent {
    pub title: String,
    pub subtitle: String,
    pub preamble: String,
    pub name: String,
    pub affiliation: String,
    pub body: [String; 3],
    pub issued_on: String,
    pub footer: [String; 2],
}

impl CertificateContent {
    /// `role` is printed with its first character uppercased, nothing else
    /// is transformed
    pub fn compose(name: &str, role: &str, organization: &str, issued_at: DateTime<Utc>) -> Self {
        Self {
            title: CERTIFICATE_TITLE.to_string(),
            subtitle: CERTIFICATE_SUBTITLE.to_string(),
            preamble: CERTIFICATE_PREAMBLE.to_string(),
            name: name.to_string(),
            affiliation: format!("from {}", organization),
            body: [
                format!(
                    "has joined as a {} in the PlantTech community",
                    capitalize(role)
                ),
                "and is recognized as a founding participant in the future of".to_string(),
                "plant communication and sustainable agriculture.".to_string(),
            ],
            issued_on: format!("Issued on {}", long_date(issued_at)),
            footer: CERTIFICATE_FOOTER.map(str::to_string),
        }
    }
}

/// `October 19, 2026`
pub fn long_date(at: DateTime<Utc>) -> String {
    at.format("%B %-d, %Y").to_string()
}

/// File name for the saved certificate
///
/// Every run of whitespace in `name` becomes a single `_`. Path separators
/// and control characters are replaced too so the result is always one
/// path component.
pub fn certificate_file_name(name: &str) -> String {
    let mut file_name = String::with_capacity(
        FILE_NAME_PREFIX.len() + name.len() + FILE_NAME_EXTENSION.len(),
    );
    file_name.push_str(FILE_NAME_PREFIX);

    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                file_name.push(FILE_NAME_SEPARATOR);
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c == '/' || c == '\\' || c.is_control() {
            file_name.push(FILE_NAME_SEPARATOR);
        } else {
            file_name.push(c);
        }
    }

    file_name.push_str(FILE_NAME_EXTENSION);
    file_name
}
