//! Chat transport port
//!
//! Defines the interface for dispatching one chat request and receiving
//! its response as a lazy fragment sequence. Implementations (adapters)
//! live in the infrastructure layer.

use askema_domain::{ModelTag, ResponseFragment, SchemaConstraint};
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur when dispatching a chat request
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Transport closed")]
    TransportClosed,

    #[error("Other error: {0}")]
    Other(String),
}

/// One outbound chat request.
///
/// Ephemeral: constructed inside a facade call, consumed by the transport,
/// never reused. Carries the (possibly augmented) prompt and the schema
/// constraint the model is asked to honor.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Model to answer the request.
    pub model: ModelTag,
    /// The single user-role prompt.
    pub prompt: String,
    /// JSON-schema constraint for the answer.
    pub format: SchemaConstraint,
}

impl ChatRequest {
    pub fn new(model: ModelTag, prompt: impl Into<String>, format: SchemaConstraint) -> Self {
        Self {
            model,
            prompt: prompt.into(),
            format,
        }
    }
}

/// Transport for chat completion requests
///
/// One `submit` per facade operation. The returned [`FragmentStream`] must
/// deliver fragments in arrival order and support the terminal-flag
/// semantics of [`FragmentStream::collect_text`].
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Dispatch a request and return its response fragment stream.
    async fn submit(&self, request: ChatRequest) -> Result<FragmentStream, TransportError>;
}

/// Handle for consuming the fragment sequence of one response.
///
/// Wraps an `mpsc::Receiver<ResponseFragment>`; the sequence is lazy,
/// single-pass, and forward-only. Dropping the handle abandons whatever
/// the transport has still in flight.
pub struct FragmentStream {
    receiver: mpsc::Receiver<ResponseFragment>,
}

impl FragmentStream {
    pub fn new(receiver: mpsc::Receiver<ResponseFragment>) -> Self {
        Self { receiver }
    }

    /// Build a stream from an already-known fragment sequence.
    ///
    /// Mostly useful for tests and single-shot transports.
    pub fn from_fragments(fragments: impl IntoIterator<Item = ResponseFragment>) -> Self {
        let fragments: Vec<_> = fragments.into_iter().collect();
        let (tx, rx) = mpsc::channel(fragments.len().max(1));
        for fragment in fragments {
            // Capacity covers every fragment, so try_send cannot fail here
            let _ = tx.try_send(fragment);
        }
        Self::new(rx)
    }

    /// Consume the stream and concatenate all text deltas into one string.
    ///
    /// Fragments with no text are skipped. Iteration stops immediately
    /// after appending a fragment whose terminal flag is set — later
    /// fragments are ignored even if the transport keeps producing them.
    /// If the channel closes without such a fragment, whatever accumulated
    /// is returned.
    pub async fn collect_text(mut self) -> String {
        let mut full_text = String::new();
        while let Some(fragment) = self.receiver.recv().await {
            let Some(text) = fragment.text() else {
                continue;
            };
            if text.is_empty() {
                continue;
            }
            full_text.push_str(text);
            if fragment.is_terminal() {
                break;
            }
        }
        full_text
    }
}
