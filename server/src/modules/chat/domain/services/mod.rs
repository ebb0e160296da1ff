// Chat Domain - Services
// Domain services hold business logic that belongs to no single entity

mod emotion_analyzer;
mod history_trimmer;

pub use emotion_analyzer::*;
pub use history_trimmer::*;
