use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use super::super::{ApplicationError, CommandHandler, SessionLocks};
use crate::modules::chat::domain::SessionId;
use crate::modules::chat::ports::SessionRepository;

/// Clear-history command
#[derive(Debug, Clone, Default)]
pub struct ClearHistoryCommand {
    /// Session to reset; `None` when the client never had one
    pub session_id: Option<SessionId>,
}

impl ClearHistoryCommand {
    pub fn new(session_id: Option<SessionId>) -> Self {
        Self { session_id }
    }
}

/// Clear-history response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearHistoryResponse {
    /// Number of turns discarded; zero for unknown sessions
    pub discarded_turns: usize,
}

/// Clear-history command handler
///
/// Resets a known session back to its seed turn. Unknown ids are a no-op
/// and never create a session.
pub struct ClearHistoryHandler {
    session_repository: Arc<dyn SessionRepository>,
    locks: Arc<SessionLocks>,
}

impl ClearHistoryHandler {
    pub fn new(session_repository: Arc<dyn SessionRepository>, locks: Arc<SessionLocks>) -> Self {
        Self {
            session_repository,
            locks,
        }
    }
}

#[async_trait]
impl CommandHandler<ClearHistoryCommand, ClearHistoryResponse> for ClearHistoryHandler {
    async fn handle(
        &self,
        command: ClearHistoryCommand,
    ) -> Result<ClearHistoryResponse, ApplicationError> {
        let unchanged = ClearHistoryResponse { discarded_turns: 0 };

        let Some(session_id) = command.session_id else {
            return Ok(unchanged);
        };
        if !self.session_repository.exists(&session_id).await? {
            return Ok(unchanged);
        }

        let _guard = self.locks.acquire(&session_id).await;
        let Some(mut session) = self.session_repository.get(&session_id).await? else {
            return Ok(unchanged);
        };

        let discarded_turns = session.len() - 1;
        session.reset_to_seed();
        self.session_repository.save(&session).await?;

        info!(session_id = %session_id, discarded_turns, "Cleared session history");
        Ok(ClearHistoryResponse { discarded_turns })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::chat::domain::{Session, Turn, TurnRole};
    use crate::modules::chat::infrastructure::InMemorySessionRepository;

    fn handler() -> (ClearHistoryHandler, Arc<InMemorySessionRepository>) {
        let repo = Arc::new(InMemorySessionRepository::new());
        let handler = ClearHistoryHandler::new(repo.clone(), Arc::new(SessionLocks::new()));
        (handler, repo)
    }

    #[tokio::test]
    async fn test_clear_existing_session() {
        let (handler, repo) = handler();
        let mut session = Session::new(SessionId::new(), "persona");
        for i in 0..7 {
            session.push(Turn::user(format!("u{}", i)));
            session.push(Turn::assistant(format!("a{}", i)));
        }
        repo.save(&session).await.unwrap();

        let response = handler
            .handle(ClearHistoryCommand::new(Some(session.id().clone())))
            .await
            .unwrap();
        assert_eq!(response.discarded_turns, 14);

        let stored = repo.get(session.id()).await.unwrap().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored.seed().role(), TurnRole::System);
        assert_eq!(stored.seed().content(), "persona");
    }

    #[tokio::test]
    async fn test_clear_unknown_session_is_noop() {
        let (handler, repo) = handler();

        let response = handler
            .handle(ClearHistoryCommand::new(Some(SessionId::new())))
            .await
            .unwrap();
        assert_eq!(response.discarded_turns, 0);

        let response = handler.handle(ClearHistoryCommand::new(None)).await.unwrap();
        assert_eq!(response.discarded_turns, 0);

        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
