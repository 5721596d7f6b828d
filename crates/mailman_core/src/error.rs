use thiserror::Error;

/// A page no longer matches the layout the extractors were written against.
///
/// These are never transient: retrying the same request returns the same page.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("expected landmark not found: {0}")]
    MissingLandmark(String),
    #[error("heading {heading:?} is not followed by a list")]
    MissingListAfterHeading { heading: String },
    #[error("settings row mixes members: expected {expected}, found {found}")]
    MismatchedMemberRow { expected: String, found: String },
    #[error("boolean option {0} has no checked value")]
    UnsetBooleanOption(String),
    #[error("field {field} holds non-numeric value {value:?}")]
    InvalidInteger { field: String, value: String },
    #[error("cannot read a message id from link {0:?}")]
    InvalidMessageId(String),
    #[error("received date {value:?} does not match {format:?}")]
    InvalidDate { value: String, format: String },
    #[error("invalid css selector {0:?}")]
    InvalidSelector(String),
    #[error("field name {0:?} does not decode to utf-8")]
    UndecodableFieldName(String),
}
