//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (ApplicationForm, FormSession, Notification, SubmissionResult)
//! - Domain value objects (PersonName, Email, ApplicantRole, ...)
//! - Domain services (certificate rendering)
//! - Repository and gateway traits (interfaces)

pub mod entity;
pub mod gateway;
pub mod repository;
pub mod services;
pub mod value_object;
