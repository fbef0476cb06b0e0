//! Chat-completion client used for lab summaries and weekly insights.

use std::future::Future;
use std::pin::Pin;

use peptrack_core::config::LlmConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

/// A single system + user prompt exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

/// Produces the assistant's text for a prompt.
pub trait CompletionProvider: Send + Sync {
    /// ## Errors
    /// Returns `UpstreamError` when the provider cannot be reached or
    /// answers with an error.
    fn complete<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = ServiceResult<String>> + Send + 'a>>;
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    completions_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiClient {
    /// ## Errors
    /// Returns `NotConfigured` when no API key is set.
    pub fn from_config(config: &LlmConfig) -> ServiceResult<Self> {
        Self::try_from_config(config).ok_or(ServiceError::NotConfigured("LLM"))
    }

    /// Builds a client, or `None` when no API key is set.
    #[must_use]
    pub fn try_from_config(config: &LlmConfig) -> Option<Self> {
        let api_key = config.api_key.as_deref().filter(|key| !key.is_empty())?;
        Some(Self {
            http: reqwest::Client::new(),
            completions_url: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
            model: config.model.clone(),
        })
    }

    fn body<'a>(&'a self, request: &'a CompletionRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }

    #[tracing::instrument(skip_all, fields(model = %self.model))]
    async fn send(&self, request: &CompletionRequest) -> ServiceResult<String> {
        let response = self
            .http
            .post(&self.completions_url)
            .bearer_auth(&self.api_key)
            .json(&self.body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "Completion request failed");
            return Err(ServiceError::UpstreamError(format!("{status}: {detail}")));
        }

        let parsed: ChatResponse = response.json().await?;
        Ok(first_content(parsed))
    }
}

impl CompletionProvider for OpenAiClient {
    fn complete<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = ServiceResult<String>> + Send + 'a>> {
        Box::pin(self.send(request))
    }
}

fn first_content(response: ChatResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default()
}

#[cfg(test)]
pub(crate) mod fake {
    //! Canned completion provider for service tests.

    use super::*;

    pub struct FakeCompletion {
        pub reply: Result<String, String>,
    }

    impl CompletionProvider for FakeCompletion {
        fn complete<'a>(
            &'a self,
            _request: &'a CompletionRequest,
        ) -> Pin<Box<dyn Future<Output = ServiceResult<String>> + Send + 'a>> {
            let reply = self.reply.clone().map_err(ServiceError::UpstreamError);
            Box::pin(async move { reply })
        }
    }
}
