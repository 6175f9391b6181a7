//! Response Generation
//!
//! A response generator turns the learner's answer to a step into feedback
//! text. The active generator is picked once at startup: the LLM-backed
//! variant when an API credential is configured, otherwise the scripted
//! fallback in [`crate::scripted`].

use crate::{conversation::Conversation, llm_client::LLMClient};
use async_trait::async_trait;
use std::sync::Arc;

/// Everything a generator may use to grade one completed step.
#[derive(Debug, Clone)]
pub struct FeedbackRequest<'a> {
    pub ai_role: &'a str,
    pub ai_instructions: &'a str,
    pub learner_response: &'a str,
    /// Zero-based index of the step that was just answered.
    pub completed_step: usize,
    pub conversation: Conversation,
}

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
    #[error("the model returned an empty completion")]
    EmptyCompletion,
}

/// Defines the contract for anything that can produce step feedback.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    async fn generate(&self, request: &FeedbackRequest<'_>) -> Result<String, GeneratorError>;

    /// Whether this generator calls out to an AI backend.
    fn is_ai_backed(&self) -> bool;
}

/// A `ResponseGenerator` that sends the conversation to an LLM.
pub struct LlmResponder {
    client: Arc<dyn LLMClient>,
}

impl LlmResponder {
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResponseGenerator for LlmResponder {
    async fn generate(&self, request: &FeedbackRequest<'_>) -> Result<String, GeneratorError> {
        tracing::debug!(turns = request.conversation.len(), "Requesting feedback from LLM");
        let text = self.client.complete(&request.conversation).await?;
        if text.is_empty() {
            return Err(GeneratorError::EmptyCompletion);
        }
        Ok(text)
    }

    fn is_ai_backed(&self) -> bool {
        true
    }
}
