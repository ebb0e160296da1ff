use async_trait::async_trait;
use thiserror::Error;

use super::super::domain::{Session, SessionId};

/// Repository error type
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Storage error: {0}")]
    StorageError(String),
}

/// Session repository port
///
/// Abstracts the session store. The in-memory adapter is process-local; a
/// multi-instance deployment needs a shared key-value backed implementation.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Fetch a session by id
    async fn get(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError>;

    /// Save a session (create or update)
    async fn save(&self, session: &Session) -> Result<(), RepositoryError>;

    /// Whether a session exists
    async fn exists(&self, id: &SessionId) -> Result<bool, RepositoryError>;

    /// Number of live sessions
    async fn count(&self) -> Result<usize, RepositoryError>;
}
