//! Applicant Message Value Object

use serde::Serialize;

use super::ValueError;

/// Relayed when the message box was left empty
pub const NO_ADDITIONAL_MESSAGE: &str = "No additional message";

pub const APPLICANT_MESSAGE_MAX_LENGTH: usize = 5000;

/// Free text from the "how would you like to contribute" box
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ApplicantMessage(String);

impl ApplicantMessage {
    /// Parse the optional field; only the empty string means "no message"
    pub fn parse(raw: &str) -> Result<Option<Self>, ValueError> {
        if raw.is_empty() {
            return Ok(None);
        }
        if raw.chars().count() > APPLICANT_MESSAGE_MAX_LENGTH {
            return Err(ValueError::TooLong {
                max: APPLICANT_MESSAGE_MAX_LENGTH,
            });
        }
        Ok(Some(Self(raw.to_string())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value sent to the relay
    pub fn relay_value(message: Option<&Self>) -> &str {
        message.map_or(NO_ADDITIONAL_MESSAGE, Self::as_str)
    }
}
