// Chat Domain - Value Objects
// Value objects are immutable and compared by value

mod emotion;
mod session_id;

pub use emotion::*;
pub use session_id::*;
