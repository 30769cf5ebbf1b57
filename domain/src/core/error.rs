//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These are precondition violations — caller bugs, reported before any
/// request is dispatched. Malformed model output is not an error at this
/// level; the decoder absorbs it and yields an absent answer instead.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("Options cannot be empty")]
    NoOptions,

    #[error("Options cannot contain blank entries")]
    BlankOption,

    #[error("Pattern cannot be empty")]
    EmptyPattern,

    #[error("Invalid model tag: {0:?}")]
    InvalidModelTag(String),
}
