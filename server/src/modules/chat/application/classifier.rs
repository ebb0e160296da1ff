use std::sync::Arc;
use tracing::warn;

use super::ChatSettings;
use crate::modules::chat::domain::{Emotion, EmotionAnalyzer};
use crate::modules::chat::ports::{CompletionRequest, LLMPort};

/// Emotion classifier
///
/// Asks the provider for a one-word label for a single user message. Never
/// fails: any provider problem yields `Emotion::Neutral`.
pub struct EmotionClassifier {
    llm_port: Arc<dyn LLMPort>,
    analyzer: EmotionAnalyzer,
    settings: ChatSettings,
}

impl EmotionClassifier {
    pub fn new(llm_port: Arc<dyn LLMPort>, settings: ChatSettings) -> Self {
        Self {
            llm_port,
            analyzer: EmotionAnalyzer::new(),
            settings,
        }
    }

    pub async fn classify(&self, user_message: &str) -> Emotion {
        let prompt = self.analyzer.prompt(user_message);
        let request = CompletionRequest::from_turns(&prompt, self.settings.model.as_str())
            .with_temperature(self.settings.classifier_temperature)
            .with_max_tokens(self.settings.classifier_max_tokens);

        match self.llm_port.complete(request).await {
            Ok(response) => self.analyzer.interpret(response.content.as_deref()),
            Err(e) => {
                warn!(
                    provider = self.llm_port.provider_id(),
                    "Emotion classification failed, using neutral: {}", e
                );
                Emotion::Neutral
            }
        }
    }
}
