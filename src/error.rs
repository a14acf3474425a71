//! Error types for the form record

use thiserror::Error;

use crate::state::RequiredField;

/// Errors raised by form record accessors and the submit transition
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    /// User input rejected; the field keeps its previous value
    #[error("invalid value for `{field}`: {reason}")]
    Validation { field: String, reason: String },

    #[error("field `{field}` expects a {expected} value")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },

    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("{collection} entries have no `{field}` field")]
    UnknownEntryField {
        collection: &'static str,
        field: &'static str,
    },

    #[error("{collection} entry #{index} does not exist (len {len})")]
    EntryOutOfRange {
        collection: &'static str,
        index: usize,
        len: usize,
    },

    #[error("year {year} is outside the plan duration of {duration} years")]
    YearOutOfRange { year: u32, duration: u8 },

    /// Export requested while required fields are still blank
    #[error("cannot export, missing required fields: {}", join_missing(.missing))]
    PreconditionViolation { missing: Vec<RequiredField> },
}

impl FormError {
    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        FormError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

fn join_missing(missing: &[RequiredField]) -> String {
    missing
        .iter()
        .map(|f| f.key())
        .collect::<Vec<_>>()
        .join(", ")
}
