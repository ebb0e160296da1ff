use thiserror::Error;

/// Process-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("LLM error: {0}")]
    LLMError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<crate::modules::chat::LLMError> for AppError {
    fn from(e: crate::modules::chat::LLMError) -> Self {
        AppError::LLMError(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
