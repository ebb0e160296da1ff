// Chat Domain - Entities
// Entities are identified by a unique id

mod session;
mod turn;

pub use session::*;
pub use turn::*;
