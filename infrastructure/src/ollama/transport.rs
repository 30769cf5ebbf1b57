//! Ollama chat transport implementation.
//!
//! Provides [`OllamaTransport`] which implements
//! [`ChatTransport`] against the Ollama `/api/chat` endpoint. Each
//! submission POSTs the request with `stream: true` and pumps the NDJSON
//! response body into a fragment channel from a background task, so the
//! caller consumes a lazy fragment sequence regardless of how the server
//! chunks its output.

use crate::ollama::error::{OllamaError, Result};
use crate::ollama::protocol::{ChatPayload, StreamLine};
use askema_application::{ChatRequest, ChatTransport, FragmentStream, TransportError};
use askema_domain::ResponseFragment;
use async_trait::async_trait;
use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Buffered fragment channel capacity. The pump blocks once the consumer
/// lags this far behind.
const FRAGMENT_CHANNEL_CAPACITY: usize = 32;

/// Chat transport for a single Ollama endpoint.
///
/// The HTTP client and base URL are fixed at construction; one instance
/// serves any number of concurrent submissions.
pub struct OllamaTransport {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaTransport {
    /// Create a transport for the given base URL (e.g.
    /// `http://localhost:11434`). A trailing slash is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    /// POST the chat payload and verify the HTTP status.
    async fn post_chat(&self, payload: &ChatPayload) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(self.chat_url())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OllamaError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ChatTransport for OllamaTransport {
    async fn submit(
        &self,
        request: ChatRequest,
    ) -> std::result::Result<FragmentStream, TransportError> {
        let payload = ChatPayload::from(&request);
        debug!(model = %request.model, "Submitting chat request to {}", self.chat_url());

        let response = self.post_chat(&payload).await.map_err(TransportError::from)?;

        let (tx, rx) = mpsc::channel(FRAGMENT_CHANNEL_CAPACITY);
        tokio::spawn(pump_fragments(response, tx));

        Ok(FragmentStream::new(rx))
    }
}

/// Read the NDJSON body and forward each parsed line as a fragment.
///
/// Ends when the body ends, the line is unparseable, the terminal line has
/// been forwarded, or the receiver is dropped. Closing the channel is the
/// end-of-sequence signal either way.
async fn pump_fragments(response: reqwest::Response, tx: mpsc::Sender<ResponseFragment>) {
    let mut body = response.bytes_stream();
    let mut buffer = LineBuffer::new();

    while let Some(chunk) = body.next().await {
        let bytes = match chunk {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Ollama stream read failed: {}", e);
                return;
            }
        };

        for line in buffer.push(&bytes) {
            if !forward_line(&line, &tx).await {
                return;
            }
        }
    }

    // Trailing data without a final newline still counts as a line.
    if let Some(line) = buffer.finish() {
        forward_line(&line, &tx).await;
    }
}

/// Parse one NDJSON line and send its fragment. Returns false when the
/// pump should stop (terminal line, parse failure, or receiver gone).
async fn forward_line(line: &str, tx: &mpsc::Sender<ResponseFragment>) -> bool {
    let parsed: StreamLine = match serde_json::from_str(line) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Unparseable Ollama stream line: {}", e);
            return false;
        }
    };

    let done = parsed.done;
    if tx.send(parsed.into_fragment()).await.is_err() {
        // Receiver dropped — the consumer stopped caring.
        return false;
    }
    !done
}

/// Splits an incoming byte stream into complete text lines.
///
/// NDJSON lines can span chunk boundaries, and one chunk can hold several
/// lines; this buffer re-aligns the two.
struct LineBuffer {
    pending: String,
}

impl LineBuffer {
    fn new() -> Self {
        Self {
            pending: String::new(),
        }
    }

    /// Append a chunk and drain every complete line it closes.
    fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.pending.push_str(&String::from_utf8_lossy(bytes));

        let mut lines = Vec::new();
        while let Some(newline) = self.pending.find('\n') {
            let line = self.pending[..newline].trim().to_string();
            self.pending.drain(..=newline);
            if !line.is_empty() {
                lines.push(line);
            }
        }
        lines
    }

    /// Drain any trailing partial line once the stream ends.
    fn finish(mut self) -> Option<String> {
        let line = self.pending.trim();
        if line.is_empty() {
            None
        } else {
            Some(line.to_string())
        }
    }
}
