//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use askema_domain::{DomainError, ModelTag};
use serde::{Deserialize, Serialize};

/// Top-level configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Ollama endpoint settings
    pub ollama: FileOllamaConfig,
}

/// Raw Ollama endpoint configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOllamaConfig {
    /// Base URL of the Ollama server
    pub base_url: String,
    /// Model tag to ask
    pub model: String,
}

impl Default for FileOllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.2".to_string(),
        }
    }
}

impl FileOllamaConfig {
    /// Parse the configured model string into a validated [`ModelTag`].
    pub fn model_tag(&self) -> Result<ModelTag, DomainError> {
        ModelTag::new(self.model.clone())
    }
}
