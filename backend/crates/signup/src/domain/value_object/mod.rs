//! Value Object Module
//!
//! Each field of the join form parses into one of these types. Parsing is
//! the only way to obtain them, so a [`ValidatedApplication`] can never hold
//! an empty required field.
//!
//! [`ValidatedApplication`]: crate::domain::entity::application_form::ValidatedApplication

pub mod applicant_message;
pub mod applicant_role;
pub mod email;
pub mod funding_amount;
pub mod organization;
pub mod person_name;

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Why a single field value was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("This field is required")]
    Required,

    #[error("Must be at most {max} characters")]
    TooLong { max: usize },

    #[error("Must not contain control characters")]
    ControlCharacter,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Unknown role '{0}'")]
    UnknownRole(String),

    #[error("Must be a non-negative number")]
    InvalidAmount,
}

/// Check a required single-line text field and keep it as supplied
///
/// Emptiness and length are judged on the trimmed, NFC-composed text, so
/// padding and decomposed accents do not count against the limit. The
/// returned value is the raw input.
pub(crate) fn required_line(raw: &str, max_chars: usize) -> Result<String, ValueError> {
    let composed: String = raw.nfc().collect();
    let visible = composed.trim();

    if visible.is_empty() {
        return Err(ValueError::Required);
    }
    if visible.chars().count() > max_chars {
        return Err(ValueError::TooLong { max: max_chars });
    }
    if raw.chars().any(char::is_control) {
        return Err(ValueError::ControlCharacter);
    }

    Ok(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_line_keeps_raw_text() {
        assert_eq!(required_line("  Jane Doe ", 10).unwrap(), "  Jane Doe ");

        // "e" + COMBINING ACUTE ACCENT counts as one character
        let value = required_line("Rene\u{301}", 4).unwrap();
        assert_eq!(value, "Rene\u{301}");
    }

    #[test]
    fn test_required_line_rejections() {
        assert_eq!(required_line("", 10), Err(ValueError::Required));
        assert_eq!(required_line(" \t ", 10), Err(ValueError::Required));
        assert_eq!(
            required_line("abcdefghijk", 10),
            Err(ValueError::TooLong { max: 10 })
        );
        assert_eq!(
            required_line("Jane\nDoe", 10),
            Err(ValueError::ControlCharacter)
        );
        assert_eq!(
            required_line("Jane Doe\n", 10),
            Err(ValueError::ControlCharacter)
        );
    }
}
