//! Application layer for askema
//!
//! This crate contains the structured ask facade and the transport port it
//! depends on. It depends only on the domain layer; concrete transports
//! are injected from the infrastructure layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::chat_transport::{ChatRequest, ChatTransport, FragmentStream, TransportError};
pub use use_cases::structured_ask::{AskError, StructuredAskUseCase};
