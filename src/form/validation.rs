//! Schema validation for field-pair collections
//!
//! The validator is pure: it never mutates the store and the same input
//! always yields the same report. All errors are collected, not
//! short-circuited, so the view can render every message at once.

use serde::Serialize;
use std::fmt;

use crate::models::{FieldPair, PairField, SelectOption};

pub const MSG_INPUT_REQUIRED: &str = "Input is required";
pub const MSG_SELECTION_REQUIRED: &str = "Selection is required";
pub const MSG_SELECTION_UNKNOWN: &str = "Selection is not a known option";
pub const MSG_COLLECTION_EMPTY: &str = "At least one field pair is required";

/// One field-level validation error, keyed by pair position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub index: usize,
    pub field: PairField,
    pub message: String,
}

/// Result of validating a whole collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Collection-level message, only set for an empty collection
    pub collection_error: Option<String>,
    pub field_errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.collection_error.is_none() && self.field_errors.is_empty()
    }

    /// Look up the message for one field of one pair
    pub fn error_for(&self, index: usize, field: PairField) -> Option<&str> {
        self.field_errors
            .iter()
            .find(|e| e.index == index && e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn error_count(&self) -> usize {
        self.field_errors.len() + usize::from(self.collection_error.is_some())
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "valid");
        }
        if let Some(ref msg) = self.collection_error {
            return write!(f, "{}", msg);
        }
        write!(f, "{} invalid field(s)", self.field_errors.len())
    }
}

/// Validates field-pair collections.
///
/// Select values are only checked for non-emptiness by default, matching the
/// form's behavior: a value outside the option set passes. Membership
/// checking is an explicit opt-in via [`Validator::with_known_options`].
#[derive(Debug, Clone, Default)]
pub struct Validator {
    known_values: Option<Vec<String>>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict variant that additionally requires select values to be members
    /// of the given option set.
    pub fn with_known_options(options: &[SelectOption]) -> Self {
        Self {
            known_values: Some(options.iter().map(|o| o.value.clone()).collect()),
        }
    }

    pub fn validate(&self, pairs: &[FieldPair]) -> ValidationReport {
        let mut report = ValidationReport::default();

        if pairs.is_empty() {
            report.collection_error = Some(MSG_COLLECTION_EMPTY.to_string());
            return report;
        }

        for (index, pair) in pairs.iter().enumerate() {
            // Minimum-length-of-1 check: all-whitespace still counts
            if pair.input_value.is_empty() {
                report.field_errors.push(FieldError {
                    index,
                    field: PairField::Input,
                    message: MSG_INPUT_REQUIRED.to_string(),
                });
            }
            if pair.select_value.is_empty() {
                report.field_errors.push(FieldError {
                    index,
                    field: PairField::Select,
                    message: MSG_SELECTION_REQUIRED.to_string(),
                });
            } else if let Some(ref known) = self.known_values {
                if !known.contains(&pair.select_value) {
                    report.field_errors.push(FieldError {
                        index,
                        field: PairField::Select,
                        message: MSG_SELECTION_UNKNOWN.to_string(),
                    });
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_pairs() -> Vec<FieldPair> {
        vec![
            FieldPair::new("alpha", "option1"),
            FieldPair::new("beta", "option2"),
        ]
    }

    #[test]
    fn test_valid_collection_has_no_errors() {
        let report = Validator::new().validate(&valid_pairs());
        assert!(report.is_valid());
        assert_eq!(report.error_count(), 0);
    }

    #[test]
    fn test_empty_collection_reports_collection_error() {
        let report = Validator::new().validate(&[]);
        assert!(!report.is_valid());
        assert_eq!(report.collection_error.as_deref(), Some(MSG_COLLECTION_EMPTY));
        assert!(report.field_errors.is_empty());
    }

    #[test]
    fn test_empty_input_reports_error_at_position() {
        let mut pairs = valid_pairs();
        pairs[1].input_value.clear();
        let report = Validator::new().validate(&pairs);
        assert!(!report.is_valid());
        assert_eq!(
            report.error_for(1, PairField::Input),
            Some(MSG_INPUT_REQUIRED)
        );
        assert_eq!(report.error_for(0, PairField::Input), None);
    }

    #[test]
    fn test_empty_select_reports_error_at_position() {
        let mut pairs = valid_pairs();
        pairs[0].select_value.clear();
        let report = Validator::new().validate(&pairs);
        assert_eq!(
            report.error_for(0, PairField::Select),
            Some(MSG_SELECTION_REQUIRED)
        );
    }

    #[test]
    fn test_all_errors_are_collected() {
        let pairs = vec![FieldPair::new("", ""), FieldPair::new("", "option1")];
        let report = Validator::new().validate(&pairs);
        assert_eq!(report.field_errors.len(), 3);
        assert_eq!(report.error_for(0, PairField::Input), Some(MSG_INPUT_REQUIRED));
        assert_eq!(
            report.error_for(0, PairField::Select),
            Some(MSG_SELECTION_REQUIRED)
        );
        assert_eq!(report.error_for(1, PairField::Input), Some(MSG_INPUT_REQUIRED));
    }

    #[test]
    fn test_whitespace_input_counts_as_filled() {
        let pairs = vec![FieldPair::new("   ", "option1")];
        assert!(Validator::new().validate(&pairs).is_valid());
    }

    #[test]
    fn test_unknown_select_value_passes_by_default() {
        let pairs = vec![FieldPair::new("alpha", "not-an-option")];
        assert!(Validator::new().validate(&pairs).is_valid());
    }

    #[test]
    fn test_strict_validator_rejects_unknown_select_value() {
        let options = vec![
            SelectOption::new("option1", "Option 1"),
            SelectOption::new("option2", "Option 2"),
        ];
        let validator = Validator::with_known_options(&options);

        let pairs = vec![FieldPair::new("alpha", "not-an-option")];
        let report = validator.validate(&pairs);
        assert_eq!(
            report.error_for(0, PairField::Select),
            Some(MSG_SELECTION_UNKNOWN)
        );

        let pairs = vec![FieldPair::new("alpha", "option2")];
        assert!(validator.validate(&pairs).is_valid());
    }

    #[test]
    fn test_validation_is_pure() {
        let pairs = valid_pairs();
        let validator = Validator::new();
        assert_eq!(validator.validate(&pairs), validator.validate(&pairs));
    }
}
