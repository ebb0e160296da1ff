use std::sync::Arc;
use tracing::{info, warn};

use super::AppConfig;
use crate::modules::chat::{LLMPort, OpenAIAdapter};
use crate::modules::ChatModule;
use crate::shared::AppResult;

/// Application-wide state shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatModule>,
}

impl AppState {
    pub fn new(chat: ChatModule) -> Self {
        Self {
            chat: Arc::new(chat),
        }
    }

    /// Wire the chat module from configuration
    ///
    /// Without an API key the module runs in offline mode.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let llm_port: Option<Arc<dyn LLMPort>> = match config.provider_config() {
            Some(provider) => {
                info!(
                    base_url = %provider.base_url,
                    model = %config.model,
                    timeout_secs = provider.timeout_secs,
                    "Using OpenAI-compatible provider"
                );
                let adapter: Arc<dyn LLMPort> = Arc::new(OpenAIAdapter::new(provider)?);
                Some(adapter)
            }
            None => {
                warn!("OPENAI_API_KEY is not set, replies will be offline echoes");
                None
            }
        };

        let chat = ChatModule::new(llm_port, config.trimmer(), config.chat_settings());
        Ok(Self::new(chat))
    }
}
