use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValueError;

/// Role the applicant joins as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicantRole {
    Researcher,
    Farmer,
    Investor,
    Other,
}

impl ApplicantRole {
    pub const ALL: [ApplicantRole; 4] = [
        ApplicantRole::Researcher,
        ApplicantRole::Farmer,
        ApplicantRole::Investor,
        ApplicantRole::Other,
    ];

    /// Wire value, as submitted by the form's role selector
    #[inline]
    pub const fn code(&self) -> &'static str {
        use ApplicantRole::*;
        match self {
            Researcher => "researcher",
            Farmer => "farmer",
            Investor => "investor",
            Other => "other",
        }
    }

    /// Human label: the code with its first character uppercased
    pub fn label(&self) -> String {
        capitalize(self.code())
    }

    pub fn from_code(code: &str) -> Result<Self, ValueError> {
        use ApplicantRole::*;
        match code.trim() {
            "" => Err(ValueError::Required),
            "researcher" => Ok(Researcher),
            "farmer" => Ok(Farmer),
            "investor" => Ok(Investor),
            "other" => Ok(Other),
            unknown => Err(ValueError::UnknownRole(unknown.to_string())),
        }
    }
}

/// Uppercase the first character and leave the rest untouched
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl FromStr for ApplicantRole {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, ValueError> {
        Self::from_code(s)
    }
}

impl fmt::Display for ApplicantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_code() {
        assert_eq!(ApplicantRole::from_code("researcher"), Ok(ApplicantRole::Researcher));
        assert_eq!(ApplicantRole::from_code("farmer"), Ok(ApplicantRole::Farmer));
        assert_eq!(ApplicantRole::from_code("investor"), Ok(ApplicantRole::Investor));
        assert_eq!(ApplicantRole::from_code("other"), Ok(ApplicantRole::Other));
        assert_eq!(ApplicantRole::from_code(""), Err(ValueError::Required));
        assert_eq!(
            ApplicantRole::from_code("Farmer"),
            Err(ValueError::UnknownRole("Farmer".into()))
        );
    }

    #[test]
    fn test_role_label() {
        assert_eq!(ApplicantRole::Farmer.label(), "Farmer");
        assert_eq!(ApplicantRole::Researcher.label(), "Researcher");
        assert_eq!(ApplicantRole::Other.to_string(), "other");
    }

    #[test]
    fn test_capitalize_only_touches_first_char() {
        assert_eq!(capitalize("farmer"), "Farmer");
        assert_eq!(capitalize("fARMER"), "FARMER");
        assert_eq!(capitalize("ßeta"), "SSeta");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_all_roles_roundtrip_codes() {
        for role in ApplicantRole::ALL {
            assert_eq!(ApplicantRole::from_code(role.code()), Ok(role));
        }
    }
}
