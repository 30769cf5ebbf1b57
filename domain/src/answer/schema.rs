//! Schema building
//!
//! Translates an [`AnswerContract`] into the JSON-schema constraint handed
//! to the model. Building is a pure function of the contract: same contract,
//! byte-identical constraint, every time.

use crate::answer::contract::AnswerContract;
use serde::Serialize;
use serde_json::json;

/// The JSON-schema constraint for one chat request
///
/// Opaque to everything except the transport, which serializes it verbatim
/// into the request's `format` field. The model is *asked* to conform to
/// it; conformance is never assumed downstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SchemaConstraint(serde_json::Value);

impl SchemaConstraint {
    /// Borrow the underlying JSON value.
    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    /// Consume into the underlying JSON value.
    pub fn into_json(self) -> serde_json::Value {
        self.0
    }
}

impl AnswerContract {
    /// Build the schema constraint for this contract.
    pub fn schema(&self) -> SchemaConstraint {
        let value = match self {
            AnswerContract::Boolean => json!({
                "type": "object",
                "properties": {
                    "answer": { "type": "boolean" }
                },
                "required": ["answer"]
            }),
            AnswerContract::SingleChoice { options } => json!({
                "type": "object",
                "properties": {
                    "selected": {
                        "type": "string",
                        "enum": options
                    }
                },
                "required": ["selected"]
            }),
            AnswerContract::MultiChoice { options } => json!({
                "type": "object",
                "properties": {
                    "selected": {
                        "type": "array",
                        "items": {
                            "type": "string",
                            "enum": options
                        }
                    }
                },
                "required": ["selected"]
            }),
            AnswerContract::PatternString {
                pattern,
                description,
            } => {
                let description = description
                    .clone()
                    .unwrap_or_else(|| format!("Must match the regex pattern: {pattern}"));
                json!({
                    "type": "object",
                    "properties": {
                        "answer": {
                            "type": "string",
                            "description": description
                        }
                    },
                    "required": ["answer"]
                })
            }
        };
        SchemaConstraint(value)
    }
}
