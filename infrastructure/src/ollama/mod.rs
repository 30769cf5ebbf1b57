//! Ollama adapter
//!
//! Implements the application layer's `ChatTransport` port against the
//! Ollama HTTP chat API.

pub mod error;
pub mod protocol;
pub mod transport;

pub use error::{OllamaError, Result};
pub use transport::OllamaTransport;
