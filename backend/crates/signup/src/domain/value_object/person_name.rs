//! Person Name Value Object
//!
//! The applicant's full name as printed on the certificate.

use serde::Serialize;
use std::fmt;

use super::{ValueError, required_line};

/// Maximum name length (in characters)
pub const PERSON_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    pub fn new(raw: &str) -> Result<Self, ValueError> {
        required_line(raw, PERSON_NAME_MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_name_valid() {
        assert_eq!(PersonName::new("Jane Doe").unwrap().as_str(), "Jane Doe");
        assert_eq!(PersonName::new("  Jane Doe ").unwrap().as_str(), "  Jane Doe ");
        assert!(PersonName::new("Zoë O'Brien-Müller").is_ok());
    }

    #[test]
    fn test_person_name_invalid() {
        assert_eq!(PersonName::new(""), Err(ValueError::Required));
        assert!(PersonName::new(&"x".repeat(PERSON_NAME_MAX_LENGTH + 1)).is_err());
    }
}
