use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::modules::chat::domain::{Session, SessionId};
use crate::modules::chat::ports::{RepositoryError, SessionRepository};

/// In-memory session repository
///
/// Sessions live for the lifetime of the process; there is no expiry and no
/// cap on the number of sessions.
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn get(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).cloned())
    }

    async fn save(&self, session: &Session) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id().clone(), session.clone());
        Ok(())
    }

    async fn exists(&self, id: &SessionId) -> Result<bool, RepositoryError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.contains_key(id))
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.len())
    }
}
