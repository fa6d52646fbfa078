//! Organization Value Object

use serde::Serialize;
use std::fmt;

use super::{ValueError, required_line};

/// Maximum organization length (in characters)
pub const ORGANIZATION_MAX_LENGTH: usize = 200;

/// The applicant's organization, printed as `from <organization>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Organization(String);

impl Organization {
    pub fn new(raw: &str) -> Result<Self, ValueError> {
        required_line(raw, ORGANIZATION_MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
