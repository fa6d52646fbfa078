//! Application Form Entity
//!
//! The raw, editable join form and its validated counterpart.
//!
//! ## Lifecycle
//! - Created empty with its form session
//! - Mutated field by field through [`FormPatch`]
//! - Reset to empty after a successful submission
//! - Dropped with its session
//!
//! ## Invariants
//! - [`ApplicationForm::validate`] is the only way to reach the submit step,
//!   and it fails whenever `name`, `email`, `organization` or `role` is empty

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::value_object::{
    ValueError,
    applicant_message::ApplicantMessage,
    applicant_role::ApplicantRole,
    email::Email,
    funding_amount::FundingAmount,
    organization::Organization,
    person_name::PersonName,
};

/// Editable form state, exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationForm {
    pub name: String,
    pub email: String,
    pub organization: String,
    pub role: String,
    pub funding_amount: String,
    pub message: String,
}

/// Partial update; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FormPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub organization: Option<String>,
    pub role: Option<String>,
    pub funding_amount: Option<String>,
    pub message: Option<String>,
}

impl ApplicationForm {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Back to the initial all-empty state
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn apply(&mut self, patch: FormPatch) {
        let FormPatch {
            name,
            email,
            organization,
            role,
            funding_amount,
            message,
        } = patch;

        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = email {
            self.email = v;
        }
        if let Some(v) = organization {
            self.organization = v;
        }
        if let Some(v) = role {
            self.role = v;
        }
        if let Some(v) = funding_amount {
            self.funding_amount = v;
        }
        if let Some(v) = message {
            self.message = v;
        }
    }

    /// Parse every field, collecting all failures rather than stopping at
    /// the first one
    pub fn validate(&self) -> Result<ValidatedApplication, ValidationErrors> {
        let mut errors = Vec::new();

        let name = collect(FormField::Name, PersonName::new(&self.name), &mut errors);
        let email = collect(FormField::Email, Email::new(&self.email), &mut errors);
        let organization = collect(
            FormField::Organization,
            Organization::new(&self.organization),
            &mut errors,
        );
        let role = collect(
            FormField::Role,
            ApplicantRole::from_code(&self.role),
            &mut errors,
        );
        let funding_amount = collect(
            FormField::FundingAmount,
            FundingAmount::parse(&self.funding_amount),
            &mut errors,
        );
        let message = collect(
            FormField::Message,
            ApplicantMessage::parse(&self.message),
            &mut errors,
        );

        match (name, email, organization, role, funding_amount, message) {
            (
                Some(name),
                Some(email),
                Some(organization),
                Some(role),
                Some(funding_amount),
                Some(message),
            ) => Ok(ValidatedApplication {
                name,
                email,
                organization,
                role,
                funding_amount,
                message,
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }
}

fn collect<T>(
    field: FormField,
    result: Result<T, ValueError>,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    result
        .map_err(|error| errors.push(FieldError::new(field, error)))
        .ok()
}

/// A form that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedApplication {
    pub name: PersonName,
    pub email: Email,
    pub organization: Organization,
    pub role: ApplicantRole,
    pub funding_amount: Option<FundingAmount>,
    pub message: Option<ApplicantMessage>,
}

/// Form field identifiers, named as the client names them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    Email,
    Organization,
    Role,
    FundingAmount,
    Message,
}

impl FormField {
    pub const fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Organization => "organization",
            FormField::Role => "role",
            FormField::FundingAmount => "fundingAmount",
            FormField::Message => "message",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
    #[serde(skip)]
    pub error: ValueError,
}

impl FieldError {
    pub fn new(field: FormField, error: ValueError) -> Self {
        Self {
            field,
            message: error.to_string(),
            error,
        }
    }
}

/// All rejected fields of one validation pass, in form order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.iter().map(|e| e.field)
    }

    pub fn get(&self, field: FormField) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
