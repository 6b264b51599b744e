use thiserror::Error;

use crate::models::{ChipList, FieldKey, FieldKind};
use crate::step::Step;
use crate::validation::Requirement;

/// Misuse of the form API by the calling view.
///
/// These never come from user input being incomplete; they mean the caller
/// addressed a field that does not exist or handed it the wrong kind of value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("field '{field}' expects a {expected} value")]
    TypeMismatch { field: FieldKey, expected: FieldKind },

    #[error("'{value}' is not a valid value for field '{field}'")]
    InvalidValue { field: FieldKey, value: String },

    #[error("field '{0}' cannot be set directly")]
    ReadOnly(FieldKey),

    /// A mirrored field is read-only until `by` is unchecked and keeps
    /// following its source meanwhile. Linked copies are never hand-edited,
    /// not even while the box stays checked.
    #[error("field '{field}' is mirrored while '{by}' is checked")]
    Locked { field: FieldKey, by: FieldKey },

    #[error("no entry at position {index} in {list} ({len} entries)")]
    IndexOutOfRange {
        list: &'static str,
        index: usize,
        len: usize,
    },
}

/// User input that is not (yet) acceptable. Each variant is surfaced to the
/// user as a notice and leaves the session unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Please complete required fields (*) before continuing.")]
    StepIncomplete {
        step: Step,
        missing: Vec<Requirement>,
    },

    #[error("This date has already been added")]
    DuplicateDate { list: ChipList, date: String },

    #[error("Maximum {limit} dates allowed")]
    DateLimitReached { list: ChipList, limit: usize },

    #[error("Please confirm the certification checkbox before submitting.")]
    NotCertified,

    #[error("Please review your application on the Review & Submit step before submitting.")]
    NotOnReviewStep { step: Step },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Rejected(#[from] Rejection),
}
