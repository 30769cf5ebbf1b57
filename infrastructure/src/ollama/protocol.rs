//! Wire types for the Ollama chat API.
//!
//! This module defines the JSON structures exchanged with the
//! `/api/chat` endpoint.
//!
//! # Protocol Overview
//!
//! - **Request**: one POST carrying the model, the message list, the
//!   structured-output constraint (`format`), and the `stream` switch.
//! - **Response**: with `stream: true`, newline-delimited JSON — one
//!   [`StreamLine`] per line, each holding an incremental `message.content`
//!   delta and a `done` flag on the final line.
//!
//! Reference: <https://github.com/ollama/ollama/blob/main/docs/api.md#generate-a-chat-completion>

use askema_application::ChatRequest;
use askema_domain::ResponseFragment;
use serde::{Deserialize, Serialize};

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: Role,
    pub content: String,
}

impl WireMessage {
    /// Creates a user message (human input).
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Request body for `/api/chat`
#[derive(Debug, Clone, Serialize)]
pub struct ChatPayload {
    pub model: String,
    pub messages: Vec<WireMessage>,
    /// JSON-schema constraint for structured output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<serde_json::Value>,
    pub stream: bool,
}

impl From<&ChatRequest> for ChatPayload {
    fn from(request: &ChatRequest) -> Self {
        Self {
            model: request.model.to_string(),
            messages: vec![WireMessage::user(&request.prompt)],
            format: Some(request.format.as_json().clone()),
            stream: true,
        }
    }
}

/// One NDJSON line of a streamed chat response
#[derive(Debug, Clone, Deserialize)]
pub struct StreamLine {
    #[serde(default)]
    pub message: Option<WireDelta>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub done_reason: Option<String>,
}

/// The incremental message delta inside a [`StreamLine`]
#[derive(Debug, Clone, Deserialize)]
pub struct WireDelta {
    pub content: String,
}

impl StreamLine {
    /// Convert this wire line into the domain's fragment type.
    pub fn into_fragment(self) -> ResponseFragment {
        ResponseFragment::new(self.message.map(|m| m.content), self.done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askema_domain::{AnswerContract, ModelTag};

    #[test]
    fn payload_carries_format_and_streams() {
        let request = ChatRequest::new(
            ModelTag::new("gemma3:12b").unwrap(),
            "Is water wet?",
            AnswerContract::boolean().schema(),
        );
        let payload = ChatPayload::from(&request);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["model"], "gemma3:12b");
        assert_eq!(json["stream"], true);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Is water wet?");
        assert_eq!(json["format"]["properties"]["answer"]["type"], "boolean");
    }

    #[test]
    fn parse_delta_line() {
        let line: StreamLine = serde_json::from_str(
            r#"{"model":"llama3.2","created_at":"2025-01-01T00:00:00Z","message":{"role":"assistant","content":"{\"answer\""},"done":false}"#,
        )
        .unwrap();
        let fragment = line.into_fragment();
        assert_eq!(fragment.text(), Some(r#"{"answer""#));
        assert!(!fragment.is_terminal());
    }

    #[test]
    fn parse_done_line() {
        let line: StreamLine = serde_json::from_str(
            r#"{"model":"llama3.2","message":{"role":"assistant","content":""},"done":true,"done_reason":"stop","eval_count":12}"#,
        )
        .unwrap();
        assert_eq!(line.done_reason.as_deref(), Some("stop"));
        let fragment = line.into_fragment();
        assert_eq!(fragment.text(), Some(""));
        assert!(fragment.is_terminal());
    }

    #[test]
    fn parse_line_without_message() {
        let line: StreamLine = serde_json::from_str(r#"{"done":true}"#).unwrap();
        let fragment = line.into_fragment();
        assert_eq!(fragment.text(), None);
        assert!(fragment.is_terminal());
    }
}
