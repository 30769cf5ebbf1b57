//! Application use cases.

pub mod structured_ask;

pub use structured_ask::{AskError, StructuredAskUseCase};
