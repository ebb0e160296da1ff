// Chat Ports Layer
// Ports are the module's interfaces to the outside world

mod llm_port;
mod session_repository;

pub use llm_port::*;
pub use session_repository::*;
