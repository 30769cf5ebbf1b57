//! Strict decoding of model output
//!
//! One target shape per [`AnswerContract`](crate::answer::AnswerContract)
//! variant, mirroring the required field the schema declares. Decoding is
//! the single error boundary for malformed model output: any failure —
//! broken syntax, missing field, wrong field type, empty input — yields
//! `None`, never a panic or an error for the caller to handle.

use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Decoded shape for [`AnswerContract::Boolean`](crate::answer::AnswerContract::Boolean).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BooleanAnswer {
    pub answer: bool,
}

/// Decoded shape for [`AnswerContract::SingleChoice`](crate::answer::AnswerContract::SingleChoice).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SingleSelection {
    pub selected: String,
}

/// Decoded shape for [`AnswerContract::MultiChoice`](crate::answer::AnswerContract::MultiChoice).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MultiSelection {
    pub selected: Vec<String>,
}

/// Decoded shape for [`AnswerContract::PatternString`](crate::answer::AnswerContract::PatternString).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PatternAnswer {
    pub answer: String,
}

/// Strictly decode aggregated model output into a target shape.
///
/// Strict means the required field must be present with the exact expected
/// type; extra fields the model volunteers are tolerated. Whitespace-only
/// input fails like any other syntax error.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Option<T> {
    serde_json::from_str(raw).ok()
}
