use crate::core::prompt::{ChatMessage, ChatPrompt};
use crate::domain::ports::ChatCompleter;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Chat-completion client for OpenAI-compatible endpoints. The base URL is
/// injected so tests can point it at a local mock server.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl OpenAiClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl ChatCompleter for OpenAiClient {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String> {
        let request = ChatCompletionRequest {
            model: prompt.model.clone(),
            messages: prompt.messages.clone(),
            temperature: prompt.temperature,
            max_tokens: prompt.max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!("POST {} (model: {})", url, request.model);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Provider returned {}: {}", status, body);
            return Err(GatewayError::ProviderStatusError {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(GatewayError::EmptyReply)
    }
}
