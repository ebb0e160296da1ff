// Chat Commands - command definitions and handlers

mod clear_history;
mod resolve_session;
mod send_message;

pub use clear_history::*;
pub use resolve_session::*;
pub use send_message::*;
