// Chat Domain Layer
// Entities, value objects and domain services

pub mod entities;
pub mod services;
pub mod value_objects;

/// Persona instruction every session is seeded with
pub const PERSONA_PROMPT: &str = "You are an intelligent conversational assistant. \
You analyze the user's emotions and respond empathetically.";

pub use entities::{Session, Turn, TurnRole};
pub use services::{EmotionAnalyzer, HistoryTrimmer};
pub use value_objects::{Emotion, SessionId};
