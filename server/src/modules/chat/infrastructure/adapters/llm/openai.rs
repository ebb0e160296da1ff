use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use crate::modules::chat::ports::{
    CompletionRequest, CompletionResponse, LLMError, LLMPort, LLMProviderConfig,
};

/// OpenAI API adapter
///
/// Speaks the `/chat/completions` protocol, so any OpenAI-compatible base URL works.
pub struct OpenAIAdapter {
    client: Client,
    config: LLMProviderConfig,
}

impl OpenAIAdapter {
    pub fn new(config: LLMProviderConfig) -> Result<Self, LLMError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LLMError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    fn to_openai_request(&self, request: &CompletionRequest) -> OpenAIRequest {
        OpenAIRequest {
            model: request.model.clone(),
            messages: request
                .messages
                .iter()
                .map(|m| OpenAIMessage {
                    role: m.role.clone(),
                    content: m.content.clone(),
                })
                .collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> LLMError {
        if e.is_timeout() {
            LLMError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            LLMError::NetworkError(e.to_string())
        }
    }

    /// Pull the first choice's text out of a response body
    ///
    /// Every field on the way is optional; anything missing means no content.
    fn extract_content(body: &str) -> Result<Option<String>, LLMError> {
        let response: OpenAIResponse =
            serde_json::from_str(body).map_err(|e| LLMError::InvalidResponse(e.to_string()))?;

        Ok(response
            .choices
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content))
    }
}

#[async_trait]
impl LLMPort for OpenAIAdapter {
    fn provider_id(&self) -> &str {
        &self.config.id
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LLMError> {
        let openai_request = self.to_openai_request(&request);

        debug!(
            model = %openai_request.model,
            messages = openai_request.messages.len(),
            "Sending OpenAI completion request"
        );

        let response = self
            .client
            .post(self.api_url("chat/completions"))
            .bearer_auth(&self.config.api_key)
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            error!("OpenAI API error: {} - {}", status, body);
            return Err(LLMError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(CompletionResponse {
            content: Self::extract_content(&body)?,
        })
    }
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Option<Vec<OpenAIChoice>>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    #[serde(default)]
    message: Option<OpenAIResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
