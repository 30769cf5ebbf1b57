//! Answer contract variants
//!
//! An [`AnswerContract`] names the shape the model's answer must take.
//! The four variants cover the supported answer shapes: a boolean, one
//! choice from a fixed set, several choices from a fixed set, and a string
//! constrained by a regular expression.

use crate::core::error::DomainError;

/// The typed contract for a single structured answer (Value Object)
///
/// Constructed through the validating constructors below; an existing
/// contract is always well-formed (non-empty option sets with no blank
/// entries, non-blank pattern). Duplicate options are not deduplicated —
/// that is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerContract {
    /// A yes/no answer.
    Boolean,
    /// Exactly one selection out of `options`.
    SingleChoice { options: Vec<String> },
    /// Any number of selections out of `options`.
    MultiChoice { options: Vec<String> },
    /// A free string that must satisfy `pattern`.
    ///
    /// `description` is surfaced to the model inside the schema; when
    /// absent, a default description naming the pattern is generated.
    PatternString {
        pattern: String,
        description: Option<String>,
    },
}

impl AnswerContract {
    /// Contract for a boolean answer.
    pub fn boolean() -> Self {
        AnswerContract::Boolean
    }

    /// Contract for a single choice out of `options`.
    pub fn single_choice(
        options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, DomainError> {
        Ok(AnswerContract::SingleChoice {
            options: validate_options(options)?,
        })
    }

    /// Contract for any number of choices out of `options`.
    pub fn multi_choice(
        options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, DomainError> {
        Ok(AnswerContract::MultiChoice {
            options: validate_options(options)?,
        })
    }

    /// Contract for a pattern-constrained string answer.
    ///
    /// Only non-blankness of the pattern is checked here; whether the
    /// pattern compiles is the concern of whoever enforces it.
    pub fn pattern_string(
        pattern: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, DomainError> {
        let pattern = pattern.into();
        if pattern.trim().is_empty() {
            return Err(DomainError::EmptyPattern);
        }
        Ok(AnswerContract::PatternString {
            pattern,
            description,
        })
    }

    /// The required top-level field in the model's answer object.
    pub fn answer_field(&self) -> &'static str {
        match self {
            AnswerContract::Boolean | AnswerContract::PatternString { .. } => "answer",
            AnswerContract::SingleChoice { .. } | AnswerContract::MultiChoice { .. } => "selected",
        }
    }
}

/// Reject empty option lists and blank entries, preserving order.
fn validate_options(
    options: impl IntoIterator<Item = impl Into<String>>,
) -> Result<Vec<String>, DomainError> {
    let options: Vec<String> = options.into_iter().map(Into::into).collect();
    if options.is_empty() {
        return Err(DomainError::NoOptions);
    }
    if options.iter().any(|o| o.trim().is_empty()) {
        return Err(DomainError::BlankOption);
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_choice_keeps_order_and_duplicates() {
        let contract = AnswerContract::single_choice(["b", "a", "b"]).unwrap();
        match contract {
            AnswerContract::SingleChoice { options } => {
                assert_eq!(options, vec!["b", "a", "b"]);
            }
            _ => panic!("Expected SingleChoice"),
        }
    }

    #[test]
    fn test_empty_options_rejected() {
        let empty: Vec<String> = vec![];
        assert_eq!(
            AnswerContract::single_choice(empty.clone()).unwrap_err(),
            DomainError::NoOptions
        );
        assert_eq!(
            AnswerContract::multi_choice(empty).unwrap_err(),
            DomainError::NoOptions
        );
    }

    #[test]
    fn test_blank_option_rejected() {
        assert_eq!(
            AnswerContract::single_choice(["Red", "  "]).unwrap_err(),
            DomainError::BlankOption
        );
    }

    #[test]
    fn test_blank_pattern_rejected() {
        assert_eq!(
            AnswerContract::pattern_string("   ", None).unwrap_err(),
            DomainError::EmptyPattern
        );
    }

    #[test]
    fn test_answer_field_per_variant() {
        assert_eq!(AnswerContract::boolean().answer_field(), "answer");
        assert_eq!(
            AnswerContract::pattern_string(r"\d+", None)
                .unwrap()
                .answer_field(),
            "answer"
        );
        assert_eq!(
            AnswerContract::single_choice(["a"]).unwrap().answer_field(),
            "selected"
        );
        assert_eq!(
            AnswerContract::multi_choice(["a"]).unwrap().answer_field(),
            "selected"
        );
    }
}
