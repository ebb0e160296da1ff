// Chat Infrastructure Layer
// Concrete implementations of the ports

pub mod adapters;
pub mod repositories;

pub use adapters::llm::OpenAIAdapter;
pub use repositories::InMemorySessionRepository;
