//! Form-specific error types

use thiserror::Error;

use crate::form::validation::ValidationReport;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Form validation failed: {0}")]
    ValidationFailed(ValidationReport),

    #[error("At least one field pair is required")]
    RemovalRefused,

    #[error("No field pair at index {index} (collection has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Failed to submit form: {0}")]
    SubmissionFailed(String),

    #[error("A submission is already in progress")]
    SubmissionInFlight,
}
