//! Model tag value object

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An Ollama-style model identifier (Value Object)
///
/// Model tags are free-form strings such as `llama3.2`, `gemma3:12b`, or
/// `qwen3:4b-instruct` — the registry decides what exists, so the domain
/// only enforces that the tag is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelTag(String);

impl ModelTag {
    /// Create a model tag, rejecting empty or whitespace-only input.
    pub fn new(tag: impl Into<String>) -> Result<Self, DomainError> {
        let tag = tag.into();
        if tag.trim().is_empty() {
            return Err(DomainError::InvalidModelTag(tag));
        }
        Ok(Self(tag))
    }

    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ModelTag {
    /// Returns the default model tag (`llama3.2`)
    fn default() -> Self {
        Self("llama3.2".to_string())
    }
}

impl std::fmt::Display for ModelTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ModelTag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelTag::new(s)
    }
}

impl Serialize for ModelTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ModelTag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
