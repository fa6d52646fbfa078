//! Funding Amount Value Object
//!
//! Optional pledge in USD. The number is only checked for shape; the text
//! is relayed exactly as entered.

use serde::Serialize;
use std::fmt;

use super::ValueError;

/// Relayed when no amount was entered
pub const NOT_SPECIFIED: &str = "Not specified";

const FUNDING_AMOUNT_MAX_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FundingAmount(String);

impl FundingAmount {
    /// Parse the optional field; only the empty string means "not specified"
    ///
    /// Anything else must read as a number once surrounding whitespace is
    /// ignored, so whitespace-only input is rejected rather than dropped.
    pub fn parse(raw: &str) -> Result<Option<Self>, ValueError> {
        if raw.is_empty() {
            return Ok(None);
        }
        if raw.len() > FUNDING_AMOUNT_MAX_LENGTH {
            return Err(ValueError::TooLong {
                max: FUNDING_AMOUNT_MAX_LENGTH,
            });
        }

        match raw.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(Some(Self(raw.to_string()))),
            _ => Err(ValueError::InvalidAmount),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value sent to the relay
    pub fn relay_value(amount: Option<&Self>) -> &str {
        amount.map_or(NOT_SPECIFIED, Self::as_str)
    }
}

impl fmt::Display for FundingAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
