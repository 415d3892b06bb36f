use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LlmSettings;

use super::error::{LlmError, LlmResult};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One message of a chat-completion conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Instruction message framing the model's persona.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// The actual prompt.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A single completion request: conversation plus sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Abstraction over the chat-completion backend.
pub trait ChatClient: Send + Sync {
    /// Send the conversation and return the trimmed text of the first choice.
    fn complete(&self, request: ChatRequest) -> BoxFuture<'static, LlmResult<String>>;
    /// Model name used for completions.
    fn model(&self) -> &str;
}

/// [`ChatClient`] speaking the OpenAI `/chat/completions` protocol.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: Arc<str>,
    api_key: Arc<str>,
    model: Arc<str>,
}

impl OpenAiClient {
    /// Build a client from the resolved settings; fails when no API key is set.
    pub fn new(settings: &LlmSettings) -> LlmResult<Self> {
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(LlmError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|source| LlmError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::from(settings.base_url.trim_end_matches('/')),
            api_key: Arc::from(api_key),
            model: Arc::from(settings.model.as_str()),
        })
    }

    async fn send(&self, request: ChatRequest) -> LlmResult<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = CompletionBody {
            model: &self.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        debug!(%url, model = %self.model, max_tokens = request.max_tokens, "sending completion request");
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.as_ref())
            .json(&body)
            .send()
            .await
            .map_err(|source| LlmError::RequestSend {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::RequestStatus { status, body });
        }

        let completion = response
            .json::<CompletionResponse>()
            .await
            .map_err(|source| LlmError::DecodeResponse { source })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(LlmError::EmptyCompletion)
    }
}

impl ChatClient for OpenAiClient {
    fn complete(&self, request: ChatRequest) -> BoxFuture<'static, LlmResult<String>> {
        let client = self.clone();
        Box::pin(async move { client.send(request).await })
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}
