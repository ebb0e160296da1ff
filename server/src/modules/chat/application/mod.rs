// Chat Application Layer
// Command handlers orchestrating the domain, the session store and the LLM port

pub mod classifier;
pub mod commands;
pub mod session_locks;

pub use classifier::*;
pub use commands::*;
pub use session_locks::*;

use async_trait::async_trait;
use thiserror::Error;

use super::ports::{LLMError, RepositoryError};

/// Application layer error type
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("LLM error: {0}")]
    LLMError(#[from] LLMError),

    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Command handler trait
///
/// Command handlers perform operations with side effects
#[async_trait]
pub trait CommandHandler<C, R>: Send + Sync
where
    C: Send + Sync,
{
    async fn handle(&self, command: C) -> Result<R, ApplicationError>;
}

/// Fixed sampling parameters for the two provider calls
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSettings {
    /// Model used for both completion and classification
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub classifier_temperature: f32,
    pub classifier_max_tokens: u32,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.8,
            max_tokens: 800,
            classifier_temperature: 0.0,
            classifier_max_tokens: 10,
        }
    }
}
