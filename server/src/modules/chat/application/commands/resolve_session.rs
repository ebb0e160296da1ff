use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use super::super::{ApplicationError, CommandHandler};
use crate::modules::chat::domain::{Session, SessionId};
use crate::modules::chat::ports::SessionRepository;

/// Resolve-session command
#[derive(Debug, Clone, Default)]
pub struct ResolveSessionCommand {
    /// Token the client presented, if any
    pub token: Option<String>,
}

impl ResolveSessionCommand {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

/// Resolve-session response
#[derive(Debug, Clone)]
pub struct ResolveSessionResponse {
    pub session_id: SessionId,
    /// The id was minted for this request and must be handed back to the client
    pub is_new: bool,
}

/// Resolve-session command handler
///
/// Reuses a known client token, otherwise mints a fresh id and stores a
/// session seeded with the persona turn.
pub struct ResolveSessionHandler {
    session_repository: Arc<dyn SessionRepository>,
    persona: String,
}

impl ResolveSessionHandler {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        persona: impl Into<String>,
    ) -> Self {
        Self {
            session_repository,
            persona: persona.into(),
        }
    }

    async fn known(&self, token: Option<&str>) -> Result<Option<SessionId>, ApplicationError> {
        let Some(id) = token.and_then(|t| SessionId::parse(t).ok()) else {
            return Ok(None);
        };
        if self.session_repository.exists(&id).await? {
            Ok(Some(id))
        } else {
            Ok(None)
        }
    }
}

#[async_trait]
impl CommandHandler<ResolveSessionCommand, ResolveSessionResponse> for ResolveSessionHandler {
    async fn handle(
        &self,
        command: ResolveSessionCommand,
    ) -> Result<ResolveSessionResponse, ApplicationError> {
        if let Some(session_id) = self.known(command.token.as_deref()).await? {
            return Ok(ResolveSessionResponse {
                session_id,
                is_new: false,
            });
        }

        let session = Session::new(SessionId::new(), self.persona.as_str());
        self.session_repository.save(&session).await?;
        info!(session_id = %session.id(), "Created new session");

        Ok(ResolveSessionResponse {
            session_id: session.id().clone(),
            is_new: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::chat::domain::TurnRole;
    use crate::modules::chat::infrastructure::InMemorySessionRepository;

    fn handler() -> (ResolveSessionHandler, Arc<InMemorySessionRepository>) {
        let repo = Arc::new(InMemorySessionRepository::new());
        (ResolveSessionHandler::new(repo.clone(), "persona"), repo)
    }

    #[tokio::test]
    async fn test_no_token_creates_seeded_session() {
        let (handler, repo) = handler();

        let response = handler.handle(ResolveSessionCommand::new(None)).await.unwrap();
        assert!(response.is_new);

        let session = repo.get(&response.session_id).await.unwrap().unwrap();
        assert_eq!(session.len(), 1);
        assert_eq!(session.seed().role(), TurnRole::System);
        assert_eq!(session.seed().content(), "persona");
    }

    #[tokio::test]
    async fn test_known_token_is_reused() {
        let (handler, repo) = handler();
        let first = handler.handle(ResolveSessionCommand::new(None)).await.unwrap();

        let token = Some(first.session_id.to_string());
        let second = handler.handle(ResolveSessionCommand::new(token)).await.unwrap();

        assert!(!second.is_new);
        assert_eq!(second.session_id, first.session_id);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_or_malformed_token_gets_fresh_id() {
        let (handler, repo) = handler();

        let stale = SessionId::new().to_string();
        let response = handler
            .handle(ResolveSessionCommand::new(Some(stale.clone())))
            .await
            .unwrap();
        assert!(response.is_new);
        assert_ne!(response.session_id.to_string(), stale);

        let response = handler
            .handle(ResolveSessionCommand::new(Some("not-a-session".to_string())))
            .await
            .unwrap();
        assert!(response.is_new);
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
