//! Domain Entities

pub mod application_form;
pub mod certificate;
pub mod form_session;
pub mod notification;
pub mod submission;
