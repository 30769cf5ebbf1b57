//! Structured ask use case.
//!
//! The public facade for typed answers: one operation per answer shape,
//! each following the same pipeline — validate inputs, build the schema
//! constraint, dispatch through the transport port, aggregate the fragment
//! stream, strictly decode, post-process, return.
//!
//! # Two error tiers
//!
//! Precondition violations (blank question, empty options, bad pattern)
//! are caller bugs and come back as [`AskError`] before anything is
//! dispatched. Everything that goes wrong at runtime — transport failure,
//! model output that is not JSON, output of the wrong shape, a pattern
//! answer that ignores the pattern — is logged and absorbed into the
//! operation's fail-closed default: `false`, `None`, or an empty `Vec`.
//! Callers never need exception-style handling around these operations.

use crate::ports::chat_transport::{ChatRequest, ChatTransport};
use askema_domain::core::string::truncate;
use askema_domain::{
    AnswerContract, BooleanAnswer, DomainError, ModelTag, MultiSelection, PatternAnswer, Question,
    SingleSelection, decode,
};
use regex::Regex;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Precondition violations reported by the ask operations.
#[derive(Error, Debug)]
pub enum AskError {
    #[error(transparent)]
    Precondition(#[from] DomainError),

    #[error("Invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Use case for asking a model typed questions.
///
/// Holds the transport port and the model tag, both fixed at construction.
/// Stateless across calls: every operation builds its own request and owns
/// its own response stream, so concurrent calls need no coordination.
pub struct StructuredAskUseCase {
    transport: Arc<dyn ChatTransport>,
    model: ModelTag,
}

impl StructuredAskUseCase {
    pub fn new(transport: Arc<dyn ChatTransport>, model: ModelTag) -> Self {
        Self { transport, model }
    }

    /// The model this use case asks.
    pub fn model(&self) -> &ModelTag {
        &self.model
    }

    /// Ask a yes/no question.
    ///
    /// Returns `false` when the model's output cannot be decoded — the
    /// fail-closed default for a boolean.
    pub async fn ask_boolean(&self, question: &str) -> Result<bool, AskError> {
        let question = Question::new(question)?;
        debug!("Processing boolean question: {}", question);

        let contract = AnswerContract::boolean();
        let answer: Option<BooleanAnswer> = self.dispatch(question.content(), &contract).await;

        let result = answer.map(|a| a.answer).unwrap_or(false);
        debug!("Boolean answer: {}", result);
        Ok(result)
    }

    /// Ask the model to pick exactly one of `options`.
    ///
    /// The schema constrains the model to the option enum, but the answer
    /// is returned as decoded — there is no post-hoc membership check, so
    /// a model that ignores the constraint can hand back a string outside
    /// `options`. This asymmetry with [`ask_pattern`](Self::ask_pattern)
    /// is deliberate.
    pub async fn ask_single_choice(
        &self,
        question: &str,
        options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Option<String>, AskError> {
        let question = Question::new(question)?;
        let contract = AnswerContract::single_choice(options)?;
        if let AnswerContract::SingleChoice { options } = &contract {
            debug!(
                "Processing single choice question: {} with options: {}",
                question,
                options.join(", ")
            );
        }

        let answer: Option<SingleSelection> = self.dispatch(question.content(), &contract).await;

        let result = answer.map(|a| a.selected);
        debug!("Single choice answer: {:?}", result);
        Ok(result)
    }

    /// Ask the model to pick any number of `options`.
    ///
    /// Returns an empty `Vec` when the model's output cannot be decoded.
    /// As with [`ask_single_choice`](Self::ask_single_choice), decoded
    /// selections are not re-checked against `options`.
    pub async fn ask_multi_choice(
        &self,
        question: &str,
        options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Vec<String>, AskError> {
        let question = Question::new(question)?;
        let contract = AnswerContract::multi_choice(options)?;
        if let AnswerContract::MultiChoice { options } = &contract {
            debug!(
                "Processing multi-choice question: {} with options: {}",
                question,
                options.join(", ")
            );
        }

        let answer: Option<MultiSelection> = self.dispatch(question.content(), &contract).await;

        let result = answer.map(|a| a.selected).unwrap_or_default();
        debug!("Multi-choice answer: {}", result.join(", "));
        Ok(result)
    }

    /// Ask for an answer that must match `pattern`.
    ///
    /// Schema constraints are advisory, so the prompt is augmented with an
    /// explicit instruction naming the pattern, and the decoded answer is
    /// independently re-validated against it. An answer that decodes but
    /// does not match yields `None`.
    pub async fn ask_pattern(
        &self,
        question: &str,
        pattern: &str,
        description: Option<&str>,
    ) -> Result<Option<String>, AskError> {
        let question = Question::new(question)?;
        let contract = AnswerContract::pattern_string(pattern, description.map(str::to_string))?;
        let matcher = Regex::new(pattern).map_err(|source| AskError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        debug!(
            "Processing pattern question: {} with pattern: {}",
            question, pattern
        );

        let mut prompt = format!(
            "{question}\n\nIMPORTANT: Your response must match this exact regex pattern: {pattern}"
        );
        if let Some(description) = description.filter(|d| !d.is_empty()) {
            prompt.push_str(&format!("\nDescription: {description}"));
        }

        let answer: Option<PatternAnswer> = self.dispatch(&prompt, &contract).await;

        let result = answer.and_then(|a| {
            if matcher.is_match(&a.answer) {
                Some(a.answer)
            } else {
                warn!(
                    "Answer {:?} does not match pattern {:?}",
                    a.answer, pattern
                );
                None
            }
        });
        debug!("Pattern answer: {:?}", result);
        Ok(result)
    }

    /// Dispatch, aggregate, and strictly decode one request.
    ///
    /// All runtime failures end here as `None`; only the logs know why.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        prompt: &str,
        contract: &AnswerContract,
    ) -> Option<T> {
        let request = ChatRequest::new(self.model.clone(), prompt, contract.schema());
        trace!("Dispatching schema constraint: {}", request.format.as_json());

        let stream = match self.transport.submit(request).await {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Chat transport failed: {}", e);
                return None;
            }
        };

        let raw = stream.collect_text().await;
        trace!("Raw model output: {}", truncate(&raw, 500));

        let decoded = decode::<T>(&raw);
        if decoded.is_none() {
            warn!(
                "Model output did not decode into the expected shape: {}",
                truncate(&raw, 200)
            );
        }
        decoded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::chat_transport::{FragmentStream, TransportError};
    use askema_domain::ResponseFragment;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    /// Transport that replays scripted fragment sequences and records
    /// every request it receives.
    struct MockTransport {
        responses: Mutex<VecDeque<Vec<ResponseFragment>>>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl MockTransport {
        fn new(responses: Vec<Vec<ResponseFragment>>) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(responses)),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Script a single response delivered as one terminal fragment.
        fn replying(raw: &str) -> Self {
            Self::new(vec![vec![ResponseFragment::terminal(raw)]])
        }

        fn submissions(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn last_request(&self) -> ChatRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl ChatTransport for MockTransport {
        async fn submit(&self, request: ChatRequest) -> Result<FragmentStream, TransportError> {
            self.requests.lock().unwrap().push(request);
            let fragments = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| TransportError::Other("No scripted response".to_string()))?;
            Ok(FragmentStream::from_fragments(fragments))
        }
    }

    /// Transport whose every submission fails.
    struct FailingTransport;

    #[async_trait]
    impl ChatTransport for FailingTransport {
        async fn submit(&self, _request: ChatRequest) -> Result<FragmentStream, TransportError> {
            Err(TransportError::ConnectionError(
                "connection refused".to_string(),
            ))
        }
    }

    fn use_case(transport: Arc<dyn ChatTransport>) -> StructuredAskUseCase {
        StructuredAskUseCase::new(transport, ModelTag::default())
    }

    // ==================== Boolean ====================

    #[tokio::test]
    async fn boolean_answer_is_decoded() {
        let transport = Arc::new(MockTransport::replying(r#"{"answer": true}"#));
        let ask = use_case(transport);
        assert!(ask.ask_boolean("Is water wet?").await.unwrap());
    }

    #[tokio::test]
    async fn boolean_malformed_output_fails_closed() {
        let transport = Arc::new(MockTransport::replying("not json"));
        let ask = use_case(transport);
        assert!(!ask.ask_boolean("Is water wet?").await.unwrap());
    }

    #[tokio::test]
    async fn boolean_transport_failure_fails_closed() {
        let ask = use_case(Arc::new(FailingTransport));
        assert!(!ask.ask_boolean("Is water wet?").await.unwrap());
    }

    #[tokio::test]
    async fn boolean_fragmented_response_is_reassembled() {
        let transport = Arc::new(MockTransport::new(vec![vec![
            ResponseFragment::delta(r#"{"ans"#),
            ResponseFragment::delta(r#"wer": tr"#),
            ResponseFragment::delta(r#"ue}"#),
            ResponseFragment::end(),
        ]]));
        let ask = use_case(transport);
        assert!(ask.ask_boolean("Is water wet?").await.unwrap());
    }

    #[tokio::test]
    async fn empty_question_is_rejected_before_dispatch() {
        let transport = Arc::new(MockTransport::replying(r#"{"answer": true}"#));
        let ask = StructuredAskUseCase::new(transport.clone(), ModelTag::default());

        let result = ask.ask_boolean("   ").await;
        assert!(matches!(
            result.unwrap_err(),
            AskError::Precondition(DomainError::EmptyQuestion)
        ));
        assert_eq!(transport.submissions(), 0);
    }

    // ==================== Single choice ====================

    #[tokio::test]
    async fn single_choice_returns_selection() {
        let transport = Arc::new(MockTransport::replying(r#"{"selected": "Blue"}"#));
        let ask = use_case(transport);
        let answer = ask
            .ask_single_choice("Pick a primary color", ["Red", "Blue", "Green"])
            .await
            .unwrap();
        assert_eq!(answer.as_deref(), Some("Blue"));
    }

    #[tokio::test]
    async fn out_of_enum_selection_is_passed_through() {
        // The enum constraint is advisory and there is no post-hoc
        // membership check, unlike ask_pattern. Pins the asymmetry.
        let transport = Arc::new(MockTransport::replying(r#"{"selected": "Purple"}"#));
        let ask = use_case(transport);
        let answer = ask
            .ask_single_choice("Pick a primary color", ["Red", "Blue", "Green"])
            .await
            .unwrap();
        assert_eq!(answer.as_deref(), Some("Purple"));
    }

    #[tokio::test]
    async fn single_choice_malformed_output_is_absent() {
        let transport = Arc::new(MockTransport::replying(r#"{"selected": 7}"#));
        let ask = use_case(transport);
        let answer = ask
            .ask_single_choice("Pick a primary color", ["Red", "Blue"])
            .await
            .unwrap();
        assert_eq!(answer, None);
    }

    #[tokio::test]
    async fn single_choice_request_carries_enum_schema() {
        let transport = Arc::new(MockTransport::replying(r#"{"selected": "Blue"}"#));
        let ask = StructuredAskUseCase::new(transport.clone(), ModelTag::default());
        ask.ask_single_choice("Pick a primary color", ["Red", "Blue"])
            .await
            .unwrap();

        let request = transport.last_request();
        assert_eq!(request.prompt, "Pick a primary color");
        assert_eq!(
            request.format.as_json()["properties"]["selected"]["enum"],
            serde_json::json!(["Red", "Blue"])
        );
    }

    #[tokio::test]
    async fn empty_options_is_rejected_before_dispatch() {
        let transport = Arc::new(MockTransport::replying(r#"{"selected": "Blue"}"#));
        let ask = StructuredAskUseCase::new(transport.clone(), ModelTag::default());

        let options: Vec<String> = vec![];
        let result = ask.ask_single_choice("Q", options).await;
        assert!(matches!(
            result.unwrap_err(),
            AskError::Precondition(DomainError::NoOptions)
        ));
        assert_eq!(transport.submissions(), 0);
    }

    #[tokio::test]
    async fn blank_option_entry_is_rejected() {
        let ask = use_case(Arc::new(FailingTransport));
        let result = ask.ask_single_choice("Q", ["Red", " "]).await;
        assert!(matches!(
            result.unwrap_err(),
            AskError::Precondition(DomainError::BlankOption)
        ));
    }

    // ==================== Multi choice ====================

    #[tokio::test]
    async fn multi_choice_returns_selections_in_order() {
        let transport = Arc::new(MockTransport::replying(
            r#"{"selected": ["Red", "Blue", "Yellow"]}"#,
        ));
        let ask = use_case(transport);
        let answer = ask
            .ask_multi_choice(
                "What are the primary colors?",
                ["Red", "Blue", "Green", "Yellow"],
            )
            .await
            .unwrap();
        assert_eq!(answer, vec!["Red", "Blue", "Yellow"]);
    }

    #[tokio::test]
    async fn multi_choice_malformed_output_is_empty() {
        let transport = Arc::new(MockTransport::replying(r#"{"selected": "Red"}"#));
        let ask = use_case(transport);
        let answer = ask
            .ask_multi_choice("What are the primary colors?", ["Red", "Blue"])
            .await
            .unwrap();
        assert!(answer.is_empty());
    }

    #[tokio::test]
    async fn multi_choice_transport_failure_is_empty() {
        let ask = use_case(Arc::new(FailingTransport));
        let answer = ask
            .ask_multi_choice("What are the primary colors?", ["Red", "Blue"])
            .await
            .unwrap();
        assert!(answer.is_empty());
    }

    // ==================== Pattern ====================

    #[tokio::test]
    async fn pattern_answer_matching_the_pattern_is_returned() {
        let transport = Arc::new(MockTransport::replying(r#"{"answer": "(212) 555-0199"}"#));
        let ask = use_case(transport);
        let answer = ask
            .ask_pattern(
                "Generate a US phone number",
                r"^\(\d{3}\) \d{3}-\d{4}$",
                None,
            )
            .await
            .unwrap();
        assert_eq!(answer.as_deref(), Some("(212) 555-0199"));
    }

    #[tokio::test]
    async fn pattern_answer_violating_the_pattern_is_absent() {
        // Decodes fine, fails the independent re-validation.
        let transport = Arc::new(MockTransport::replying(r#"{"answer": "555-1234"}"#));
        let ask = use_case(transport);
        let answer = ask
            .ask_pattern(
                "Generate a US phone number",
                r"^\(\d{3}\) \d{3}-\d{4}$",
                None,
            )
            .await
            .unwrap();
        assert_eq!(answer, None);
    }

    #[tokio::test]
    async fn pattern_prompt_is_augmented_with_the_pattern() {
        let transport = Arc::new(MockTransport::replying(r#"{"answer": "(212) 555-0199"}"#));
        let ask = StructuredAskUseCase::new(transport.clone(), ModelTag::default());
        ask.ask_pattern(
            "Generate a US phone number",
            r"^\(\d{3}\) \d{3}-\d{4}$",
            Some("Area code in parentheses"),
        )
        .await
        .unwrap();

        let prompt = transport.last_request().prompt;
        assert!(prompt.starts_with("Generate a US phone number"));
        assert!(prompt.contains(
            r"IMPORTANT: Your response must match this exact regex pattern: ^\(\d{3}\) \d{3}-\d{4}$"
        ));
        assert!(prompt.ends_with("\nDescription: Area code in parentheses"));
    }

    #[tokio::test]
    async fn pattern_prompt_omits_missing_description() {
        let transport = Arc::new(MockTransport::replying(r#"{"answer": "x"}"#));
        let ask = StructuredAskUseCase::new(transport.clone(), ModelTag::default());
        ask.ask_pattern("Say x", "x", None).await.unwrap();
        assert!(!transport.last_request().prompt.contains("Description:"));
    }

    #[tokio::test]
    async fn pattern_malformed_output_is_absent() {
        let transport = Arc::new(MockTransport::replying("{}"));
        let ask = use_case(transport);
        let answer = ask.ask_pattern("Generate a code", r"^\d+$", None).await.unwrap();
        assert_eq!(answer, None);
    }

    #[tokio::test]
    async fn empty_pattern_is_rejected_before_dispatch() {
        let transport = Arc::new(MockTransport::replying(r#"{"answer": "x"}"#));
        let ask = StructuredAskUseCase::new(transport.clone(), ModelTag::default());
        let result = ask.ask_pattern("Q", "  ", None).await;
        assert!(matches!(
            result.unwrap_err(),
            AskError::Precondition(DomainError::EmptyPattern)
        ));
        assert_eq!(transport.submissions(), 0);
    }

    #[tokio::test]
    async fn uncompilable_pattern_is_rejected_before_dispatch() {
        let transport = Arc::new(MockTransport::replying(r#"{"answer": "x"}"#));
        let ask = StructuredAskUseCase::new(transport.clone(), ModelTag::default());
        let result = ask.ask_pattern("Q", "(unclosed", None).await;
        assert!(matches!(result.unwrap_err(), AskError::InvalidPattern { .. }));
        assert_eq!(transport.submissions(), 0);
    }
}
