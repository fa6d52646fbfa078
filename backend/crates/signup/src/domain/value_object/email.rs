//! Email Value Object
//!
//! Represents a syntactically valid email address.
//! The address is never verified against a mail server; the relay either
//! delivers or it does not.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::ValueError;

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Maximum local part length (per RFC 5321)
const LOCAL_PART_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Parse an address
    ///
    /// Surrounding whitespace is dropped and the domain is lowercased; the
    /// local part is kept as typed.
    pub fn new(raw: &str) -> Result<Self, ValueError> {
        let raw = raw.trim();

        if raw.is_empty() {
            return Err(ValueError::Required);
        }
        if raw.len() > EMAIL_MAX_LENGTH {
            return Err(ValueError::TooLong {
                max: EMAIL_MAX_LENGTH,
            });
        }

        let (local, domain) = raw.split_once('@').ok_or(ValueError::InvalidEmail)?;
        if !Self::is_valid_local(local) || !Self::is_valid_domain(domain) {
            return Err(ValueError::InvalidEmail);
        }

        Ok(Self(format!("{}@{}", local, domain.to_ascii_lowercase())))
    }

    fn is_valid_local(local: &str) -> bool {
        !local.is_empty()
            && local.len() <= LOCAL_PART_MAX_LENGTH
            && !local.chars().any(|c| c.is_whitespace() || c.is_control())
    }

    fn is_valid_domain(domain: &str) -> bool {
        // Rejects a second '@' as well
        if domain.is_empty() || !domain.contains('.') {
            return false;
        }
        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return false;
        }
        if domain.starts_with('.') || domain.ends_with('.') || domain.contains("..") {
            return false;
        }
        !(domain.starts_with('-') || domain.ends_with('-'))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the domain part of the email
    pub fn domain(&self) -> &str {
        self.0.split('@').nth(1).unwrap_or("")
    }
}

impl FromStr for Email {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, ValueError> {
        Email::new(s)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::new("jane@example.com").is_ok());
        assert!(Email::new("jane.doe@farms.co.uk").is_ok());
        assert!(Email::new("jane+join@example.com").is_ok());
    }

    #[test]
    fn test_email_invalid() {
        assert_eq!(Email::new(""), Err(ValueError::Required));
        assert_eq!(Email::new("janeexample.com"), Err(ValueError::InvalidEmail));
        assert_eq!(Email::new("jane@"), Err(ValueError::InvalidEmail));
        assert_eq!(Email::new("@example.com"), Err(ValueError::InvalidEmail));
        assert_eq!(Email::new("jane@@example.com"), Err(ValueError::InvalidEmail));
        assert_eq!(Email::new("jane@example"), Err(ValueError::InvalidEmail));
        assert_eq!(Email::new("jane@exa..mple.com"), Err(ValueError::InvalidEmail));
        assert_eq!(Email::new("ja ne@example.com"), Err(ValueError::InvalidEmail));
    }

    #[test]
    fn test_email_domain_lowercased_local_kept() {
        let email = Email::new("  Jane@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "Jane@example.com");
        assert_eq!(email.domain(), "example.com");
    }
}
