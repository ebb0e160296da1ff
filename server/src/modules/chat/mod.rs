// Chat Module
//
// Hexagonal layout:
// - domain: entities, value objects and domain services
// - ports: abstract interfaces to the outside world
// - infrastructure: concrete adapters for the ports
// - application: command handlers

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{
    ApplicationError, ChatSettings, ClearHistoryCommand, ClearHistoryHandler,
    ClearHistoryResponse, CommandHandler, EmotionClassifier, ResolveSessionCommand,
    ResolveSessionHandler, ResolveSessionResponse, SendMessageCommand, SendMessageHandler,
    SendMessageResponse, SessionLocks, OFFLINE_REPLY_PREFIX,
};

pub use domain::{
    Emotion, EmotionAnalyzer, HistoryTrimmer, Session, SessionId, Turn, TurnRole, PERSONA_PROMPT,
};

pub use infrastructure::{InMemorySessionRepository, OpenAIAdapter};

pub use ports::{
    CompletionRequest, CompletionResponse, LLMChatMessage, LLMError, LLMPort, LLMProviderConfig,
    RepositoryError, SessionRepository,
};

use std::sync::Arc;

/// Chat module container
///
/// Wires the session store, the optional LLM provider and the command handlers
pub struct ChatModule {
    session_repository: Arc<dyn SessionRepository>,
    resolve_session_handler: ResolveSessionHandler,
    send_message_handler: SendMessageHandler,
    clear_history_handler: ClearHistoryHandler,
}

impl ChatModule {
    /// Create a ChatModule backed by the in-memory session store
    ///
    /// # Arguments
    /// * `llm_port` - provider adapter; `None` runs in offline mode
    /// * `trimmer` - per-session history limit
    /// * `settings` - model and sampling parameters
    pub fn new(
        llm_port: Option<Arc<dyn LLMPort>>,
        trimmer: HistoryTrimmer,
        settings: ChatSettings,
    ) -> Self {
        let session_repository: Arc<dyn SessionRepository> =
            Arc::new(InMemorySessionRepository::new());

        Self::with_repository(session_repository, llm_port, trimmer, settings)
    }

    /// Create a ChatModule with a custom session repository
    pub fn with_repository(
        session_repository: Arc<dyn SessionRepository>,
        llm_port: Option<Arc<dyn LLMPort>>,
        trimmer: HistoryTrimmer,
        settings: ChatSettings,
    ) -> Self {
        let locks = Arc::new(SessionLocks::new());

        let resolve_session_handler =
            ResolveSessionHandler::new(session_repository.clone(), PERSONA_PROMPT);
        let send_message_handler = SendMessageHandler::new(
            session_repository.clone(),
            llm_port,
            locks.clone(),
            trimmer,
            settings,
        );
        let clear_history_handler = ClearHistoryHandler::new(session_repository.clone(), locks);

        Self {
            session_repository,
            resolve_session_handler,
            send_message_handler,
            clear_history_handler,
        }
    }

    // Command handlers

    /// Resolve the client's session, minting one when needed
    pub async fn resolve_session(
        &self,
        command: ResolveSessionCommand,
    ) -> Result<ResolveSessionResponse, ApplicationError> {
        self.resolve_session_handler.handle(command).await
    }

    /// Run one chat turn
    pub async fn send_message(
        &self,
        command: SendMessageCommand,
    ) -> Result<SendMessageResponse, ApplicationError> {
        self.send_message_handler.handle(command).await
    }

    /// Reset a session to its seed turn
    pub async fn clear_history(
        &self,
        command: ClearHistoryCommand,
    ) -> Result<ClearHistoryResponse, ApplicationError> {
        self.clear_history_handler.handle(command).await
    }

    // Accessors

    /// Whether replies are synthesized locally
    pub fn is_offline(&self) -> bool {
        self.send_message_handler.is_offline()
    }

    pub fn session_repository(&self) -> &Arc<dyn SessionRepository> {
        &self.session_repository
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_chat_module_integration() {
        let module = ChatModule::new(None, HistoryTrimmer::default(), ChatSettings::default());
        assert!(module.is_offline());

        // resolve a fresh session
        let resolved = module
            .resolve_session(ResolveSessionCommand::new(None))
            .await
            .unwrap();
        assert!(resolved.is_new);

        // chat twice
        for text in ["hello", "again"] {
            let response = module
                .send_message(SendMessageCommand::new(resolved.session_id.clone(), text))
                .await
                .unwrap();
            assert_eq!(response.reply, format!("{}{}", OFFLINE_REPLY_PREFIX, text));
        }

        let session = module
            .session_repository()
            .get(&resolved.session_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(session.len(), 5);
        assert_eq!(session.seed().content(), PERSONA_PROMPT);

        // clear
        let cleared = module
            .clear_history(ClearHistoryCommand::new(Some(resolved.session_id.clone())))
            .await
            .unwrap();
        assert_eq!(cleared.discarded_turns, 4);

        // same token keeps resolving to the same session
        let again = module
            .resolve_session(ResolveSessionCommand::new(Some(
                resolved.session_id.to_string(),
            )))
            .await
            .unwrap();
        assert!(!again.is_new);
        assert_eq!(again.session_id, resolved.session_id);
    }
}
