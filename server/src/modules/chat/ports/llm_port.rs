use async_trait::async_trait;
use thiserror::Error;

use super::super::domain::Turn;

/// LLM error type
#[derive(Debug, Error)]
pub enum LLMError {
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Non-success status; `body` is the provider's raw response text
    #[error("API error: {status} - {body}")]
    ApiError { status: u16, body: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl LLMError {
    /// Whether a caller may reasonably try the same request again
    pub fn is_retryable(&self) -> bool {
        match self {
            LLMError::Timeout { .. } | LLMError::NetworkError(_) => true,
            LLMError::ApiError { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Chat message in provider format
#[derive(Debug, Clone, PartialEq)]
pub struct LLMChatMessage {
    pub role: String,
    pub content: String,
}

impl From<&Turn> for LLMChatMessage {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.role().to_openai_role().to_string(),
            content: turn.content().to_string(),
        }
    }
}

/// Completion request
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Conversation context, oldest first
    pub messages: Vec<LLMChatMessage>,
    /// Model id
    pub model: String,
    /// Output cap in tokens
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 - 2.0)
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    pub fn new(messages: Vec<LLMChatMessage>, model: impl Into<String>) -> Self {
        Self {
            messages,
            model: model.into(),
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn from_turns<'a>(
        turns: impl IntoIterator<Item = &'a Turn>,
        model: impl Into<String>,
    ) -> Self {
        Self::new(turns.into_iter().map(LLMChatMessage::from).collect(), model)
    }

    pub fn with_max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// Completion response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionResponse {
    /// Generated text, `None` when the provider returned no content
    pub content: Option<String>,
}

/// LLM service port
///
/// Every chat-completion provider adapter implements this trait
#[async_trait]
pub trait LLMPort: Send + Sync {
    fn provider_id(&self) -> &str;

    /// Single non-streaming completion
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LLMError>;
}

/// LLM provider configuration
#[derive(Debug, Clone)]
pub struct LLMProviderConfig {
    pub id: String,
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for LLMProviderConfig {
    fn default() -> Self {
        Self {
            id: "openai".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            timeout_secs: 60,
        }
    }
}
