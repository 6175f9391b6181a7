use crate::conversation::{Conversation, Turn};
use anyhow::{Context, Result};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
};
use async_trait::async_trait;

/// A generic client for a text-completion LLM.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Sends the conversation and returns the trimmed text of the first choice.
    async fn complete(&self, conversation: &Conversation) -> Result<String>;
}

/// An implementation of `LLMClient` for any OpenAI-compatible API.
pub struct OpenAICompatibleClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAICompatibleClient {
    /// Creates a new client for an OpenAI-compatible service.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration for the OpenAI client, including API key and base URL.
    /// * `model` - The model identifier to use for chat completions (e.g., "gpt-4o").
    pub fn new(config: OpenAIConfig, model: String) -> Self {
        Self {
            client: Client::with_config(config),
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

fn to_request_messages(conversation: &Conversation) -> Result<Vec<ChatCompletionRequestMessage>> {
    conversation
        .turns
        .iter()
        .map(|turn| -> Result<ChatCompletionRequestMessage> {
            let message: ChatCompletionRequestMessage = match turn {
                Turn::System(content) => ChatCompletionRequestSystemMessageArgs::default()
                    .content(content.clone())
                    .build()?
                    .into(),
                Turn::Assistant(content) => ChatCompletionRequestAssistantMessageArgs::default()
                    .content(content.clone())
                    .build()?
                    .into(),
                Turn::User(content) => ChatCompletionRequestUserMessageArgs::default()
                    .content(content.clone())
                    .build()?
                    .into(),
            };
            Ok(message)
        })
        .collect()
}

#[async_trait]
impl LLMClient for OpenAICompatibleClient {
    async fn complete(&self, conversation: &Conversation) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(to_request_messages(conversation)?)
            .build()?;

        let response: CreateChatCompletionResponse = self.client.chat().create(request).await?;

        let content = response
            .choices
            .first()
            .context("No response choice from LLM")?
            .message
            .content
            .as_ref()
            .context("No content in LLM response")?;

        Ok(content.trim().to_string())
    }
}
