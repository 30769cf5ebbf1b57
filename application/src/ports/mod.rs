//! Ports consumed by the application layer.
//!
//! Implementations (adapters) live in the infrastructure layer.

pub mod chat_transport;

pub use chat_transport::{ChatRequest, ChatTransport, FragmentStream, TransportError};
