//! Error types for the Ollama adapter

use askema_application::TransportError;
use thiserror::Error;

/// Result type alias for Ollama operations
pub type Result<T> = std::result::Result<T, OllamaError>;

/// Errors that can occur when talking to an Ollama endpoint
#[derive(Error, Debug)]
pub enum OllamaError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Ollama API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl From<OllamaError> for TransportError {
    fn from(err: OllamaError) -> Self {
        match err {
            OllamaError::Http(e) if e.is_connect() => {
                TransportError::ConnectionError(e.to_string())
            }
            OllamaError::Http(e) => TransportError::RequestFailed(e.to_string()),
            OllamaError::Api { status, message } => {
                TransportError::RequestFailed(format!("HTTP {status}: {message}"))
            }
        }
    }
}
