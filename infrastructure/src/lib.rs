//! Infrastructure layer for askema
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer, plus configuration file loading.

pub mod config;
pub mod ollama;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig, FileOllamaConfig};
pub use ollama::{OllamaError, OllamaTransport};
