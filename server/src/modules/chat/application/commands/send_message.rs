use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use super::super::{ApplicationError, ChatSettings, CommandHandler, EmotionClassifier, SessionLocks};
use crate::modules::chat::domain::{Emotion, HistoryTrimmer, Session, SessionId, Turn};
use crate::modules::chat::ports::{CompletionRequest, LLMPort, SessionRepository};

/// Prefix of the canned reply produced without a provider credential
pub const OFFLINE_REPLY_PREFIX: &str = "Offline simulation: Echo: ";

/// Send-message command
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub session_id: SessionId,
    /// Raw user text; surrounding whitespace is stripped before use
    pub content: String,
}

impl SendMessageCommand {
    pub fn new(session_id: SessionId, content: impl Into<String>) -> Self {
        Self {
            session_id,
            content: content.into(),
        }
    }
}

/// Send-message response
#[derive(Debug, Clone, PartialEq)]
pub struct SendMessageResponse {
    pub reply: String,
    pub emotion: Emotion,
}

/// Provider-backed half of the handler
struct OnlineBackend {
    llm_port: Arc<dyn LLMPort>,
    classifier: EmotionClassifier,
}

/// Send-message command handler
///
/// Appends the user turn, asks the provider for a reply while classifying
/// the message in parallel, then appends the reply. Without a provider it
/// answers with an offline echo and skips classification.
pub struct SendMessageHandler {
    session_repository: Arc<dyn SessionRepository>,
    backend: Option<OnlineBackend>,
    locks: Arc<SessionLocks>,
    trimmer: HistoryTrimmer,
    settings: ChatSettings,
}

impl SendMessageHandler {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        llm_port: Option<Arc<dyn LLMPort>>,
        locks: Arc<SessionLocks>,
        trimmer: HistoryTrimmer,
        settings: ChatSettings,
    ) -> Self {
        let backend = llm_port.map(|llm_port| OnlineBackend {
            classifier: EmotionClassifier::new(llm_port.clone(), settings.clone()),
            llm_port,
        });

        Self {
            session_repository,
            backend,
            locks,
            trimmer,
            settings,
        }
    }

    pub fn is_offline(&self) -> bool {
        self.backend.is_none()
    }

    /// Append a turn, trim, and persist
    async fn append(&self, session: &mut Session, turn: Turn) -> Result<(), ApplicationError> {
        session.push(turn);
        let evicted = self.trimmer.trim(session);
        if evicted > 0 {
            debug!(session_id = %session.id(), evicted, "Trimmed session history");
        }
        self.session_repository.save(session).await?;
        Ok(())
    }
}

#[async_trait]
impl CommandHandler<SendMessageCommand, SendMessageResponse> for SendMessageHandler {
    async fn handle(
        &self,
        command: SendMessageCommand,
    ) -> Result<SendMessageResponse, ApplicationError> {
        let content = command.content.trim();
        if content.is_empty() {
            return Err(ApplicationError::ValidationError(
                "Empty message".to_string(),
            ));
        }

        let _guard = self.locks.acquire(&command.session_id).await;

        let mut session = self
            .session_repository
            .get(&command.session_id)
            .await?
            .ok_or_else(|| ApplicationError::SessionNotFound(command.session_id.to_string()))?;

        self.append(&mut session, Turn::user(content)).await?;

        let Some(backend) = &self.backend else {
            let reply = format!("{}{}", OFFLINE_REPLY_PREFIX, content);
            self.append(&mut session, Turn::assistant(reply.as_str()))
                .await?;
            return Ok(SendMessageResponse {
                reply,
                emotion: Emotion::Neutral,
            });
        };

        let request = CompletionRequest::from_turns(session.turns(), self.settings.model.as_str())
            .with_temperature(self.settings.temperature)
            .with_max_tokens(self.settings.max_tokens);

        let (completion, emotion) = tokio::join!(
            backend.llm_port.complete(request),
            backend.classifier.classify(content)
        );

        // a failed completion leaves only the user turn behind
        let reply = completion?.content.unwrap_or_default();
        self.append(&mut session, Turn::assistant(reply.as_str()))
            .await?;

        info!(
            session_id = %session.id(),
            turns = session.len(),
            %emotion,
            "Chat turn completed"
        );

        Ok(SendMessageResponse {
            reply,
            emotion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::chat::domain::TurnRole;
    use crate::modules::chat::infrastructure::InMemorySessionRepository;
    use crate::modules::chat::ports::{CompletionResponse, LLMError};

    #[derive(Clone, Copy)]
    enum MockBehavior {
        /// Replies "reply #<context len>", labels the message "Sadness."
        Replying,
        /// Completion fails with a 500, classification still answers
        FailingCompletion,
        /// Completion has no content, classification fails
        SilentWithBrokenClassifier,
    }

    struct MockLLMPort {
        behavior: MockBehavior,
    }

    impl MockLLMPort {
        fn port(behavior: MockBehavior) -> Arc<dyn LLMPort> {
            Arc::new(Self { behavior })
        }

        fn is_classification(request: &CompletionRequest) -> bool {
            request.max_tokens == Some(10)
        }
    }

    #[async_trait]
    impl LLMPort for MockLLMPort {
        fn provider_id(&self) -> &str {
            "mock"
        }

        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionResponse, LLMError> {
            if Self::is_classification(&request) {
                return match self.behavior {
                    MockBehavior::SilentWithBrokenClassifier => {
                        Err(LLMError::NetworkError("connection reset".to_string()))
                    }
                    _ => Ok(CompletionResponse {
                        content: Some("Sadness.".to_string()),
                    }),
                };
            }
            match self.behavior {
                MockBehavior::Replying => Ok(CompletionResponse {
                    content: Some(format!("reply #{}", request.messages.len())),
                }),
                MockBehavior::FailingCompletion => Err(LLMError::ApiError {
                    status: 500,
                    body: "upstream exploded".to_string(),
                }),
                MockBehavior::SilentWithBrokenClassifier => {
                    Ok(CompletionResponse { content: None })
                }
            }
        }
    }

    async fn setup(
        llm: Option<Arc<dyn LLMPort>>,
        max_turns: usize,
    ) -> (SendMessageHandler, Arc<InMemorySessionRepository>, SessionId) {
        let repo = Arc::new(InMemorySessionRepository::new());
        let session = Session::new(SessionId::new(), "persona");
        let session_id = session.id().clone();
        repo.save(&session).await.unwrap();

        let handler = SendMessageHandler::new(
            repo.clone(),
            llm,
            Arc::new(SessionLocks::new()),
            HistoryTrimmer::new(max_turns),
            ChatSettings::default(),
        );
        (handler, repo, session_id)
    }

    #[tokio::test]
    async fn test_offline_echo() {
        let (handler, repo, session_id) = setup(None, 40).await;
        assert!(handler.is_offline());

        let response = handler
            .handle(SendMessageCommand::new(session_id.clone(), "  hi  "))
            .await
            .unwrap();

        assert_eq!(response.reply, "Offline simulation: Echo: hi");
        assert_eq!(response.emotion, Emotion::Neutral);

        let session = repo.get(&session_id).await.unwrap().unwrap();
        assert_eq!(session.len(), 3);
        assert_eq!(session.turns()[1], Turn::user("hi"));
        assert_eq!(
            session.turns()[2],
            Turn::assistant("Offline simulation: Echo: hi")
        );
    }

    #[tokio::test]
    async fn test_send_message_with_provider() {
        let llm = MockLLMPort::port(MockBehavior::Replying);
        let (handler, repo, session_id) = setup(Some(llm), 40).await;

        let response = handler
            .handle(SendMessageCommand::new(session_id.clone(), "Hello"))
            .await
            .unwrap();

        // persona + user turn were sent as context
        assert_eq!(response.reply, "reply #2");
        assert_eq!(response.emotion, Emotion::Sadness);

        let session = repo.get(&session_id).await.unwrap().unwrap();
        let roles: Vec<TurnRole> = session.turns().iter().map(Turn::role).collect();
        assert_eq!(
            roles,
            vec![TurnRole::System, TurnRole::User, TurnRole::Assistant]
        );
    }

    #[tokio::test]
    async fn test_turns_accumulate_in_order() {
        let llm = MockLLMPort::port(MockBehavior::Replying);
        let (handler, repo, session_id) = setup(Some(llm), 40).await;

        for text in ["first", "second"] {
            handler
                .handle(SendMessageCommand::new(session_id.clone(), text))
                .await
                .unwrap();
        }

        let session = repo.get(&session_id).await.unwrap().unwrap();
        let contents: Vec<&str> = session.turns().iter().map(Turn::content).collect();
        assert_eq!(
            contents,
            vec!["persona", "first", "reply #2", "second", "reply #4"]
        );
    }

    #[tokio::test]
    async fn test_failed_completion_keeps_only_user_turn() {
        let llm = MockLLMPort::port(MockBehavior::FailingCompletion);
        let (handler, repo, session_id) = setup(Some(llm), 40).await;

        let result = handler
            .handle(SendMessageCommand::new(session_id.clone(), "Hello"))
            .await;

        match result {
            Err(ApplicationError::LLMError(LLMError::ApiError { body, .. })) => {
                assert_eq!(body, "upstream exploded");
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let session = repo.get(&session_id).await.unwrap().unwrap();
        assert_eq!(session.len(), 2);
        assert_eq!(session.last(), &Turn::user("Hello"));
    }

    #[tokio::test]
    async fn test_classifier_failure_still_stores_empty_reply() {
        let llm = MockLLMPort::port(MockBehavior::SilentWithBrokenClassifier);
        let (handler, repo, session_id) = setup(Some(llm), 40).await;

        let response = handler
            .handle(SendMessageCommand::new(session_id.clone(), "Hello"))
            .await
            .unwrap();

        assert_eq!(response.reply, "");
        assert_eq!(response.emotion, Emotion::Neutral);

        let session = repo.get(&session_id).await.unwrap().unwrap();
        assert_eq!(session.len(), 3);
        assert_eq!(session.turns()[1], Turn::user("Hello"));
        assert_eq!(session.last(), &Turn::assistant(""));
    }

    #[tokio::test]
    async fn test_history_is_trimmed_keeping_seed() {
        let (handler, repo, session_id) = setup(None, 5).await;

        for i in 0..10 {
            handler
                .handle(SendMessageCommand::new(session_id.clone(), format!("m{}", i)))
                .await
                .unwrap();
        }

        let session = repo.get(&session_id).await.unwrap().unwrap();
        assert_eq!(session.len(), 5);
        assert_eq!(session.seed(), &Turn::system("persona"));
        assert_eq!(
            session.last(),
            &Turn::assistant("Offline simulation: Echo: m9")
        );
    }

    #[tokio::test]
    async fn test_send_empty_message() {
        let (handler, repo, session_id) = setup(None, 40).await;

        let result = handler
            .handle(SendMessageCommand::new(session_id.clone(), "   \n\t"))
            .await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
        assert_eq!(repo.get(&session_id).await.unwrap().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let (handler, _repo, _session_id) = setup(None, 40).await;

        let result = handler
            .handle(SendMessageCommand::new(SessionId::new(), "hello"))
            .await;

        assert!(matches!(result, Err(ApplicationError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn test_concurrent_requests_on_one_session_do_not_lose_turns() {
        let (handler, repo, session_id) = setup(None, 100).await;
        let handler = Arc::new(handler);

        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let handler = handler.clone();
                let session_id = session_id.clone();
                tokio::spawn(async move {
                    handler
                        .handle(SendMessageCommand::new(session_id, format!("msg {}", i)))
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let session = repo.get(&session_id).await.unwrap().unwrap();
        assert_eq!(session.len(), 1 + 8 * 2);
        // every user turn is directly followed by its own echo
        for pair in session.turns()[1..].chunks(2) {
            assert_eq!(pair[0].role(), TurnRole::User);
            assert_eq!(
                pair[1].content(),
                format!("{}{}", OFFLINE_REPLY_PREFIX, pair[0].content())
            );
        }
    }
}
