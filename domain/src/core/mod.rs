//! Core domain concepts shared across all subdomains.
//!
//! - [`model::ModelTag`] — validated Ollama-style model identifier
//! - [`question::Question`] — a validated question to pose to the model
//! - [`error::DomainError`] — domain-level precondition errors

pub mod error;
pub mod model;
pub mod question;
pub mod string;
