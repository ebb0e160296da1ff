// Chat Infrastructure - Repositories
//
// InMemorySessionRepository: process-local session store

mod in_memory_session_repository;

pub use in_memory_session_repository::*;
