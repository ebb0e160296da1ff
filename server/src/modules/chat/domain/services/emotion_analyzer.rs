use super::super::entities::Turn;
use super::super::value_objects::Emotion;

/// Instruction sent ahead of the text being classified
pub const CLASSIFIER_INSTRUCTION: &str =
    "Emotion classifier: joy, sadness, anger, fear, surprise, neutral, disgust, tired";

/// Emotion analysis service
///
/// Domain service: phrases the single-turn classification prompt and turns
/// the model's answer back into an `Emotion`.
#[derive(Debug, Clone, Default)]
pub struct EmotionAnalyzer;

impl EmotionAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Build the classification prompt for one user message
    ///
    /// Only the message itself is sent, never the conversation history.
    pub fn prompt(&self, user_message: &str) -> [Turn; 2] {
        [
            Turn::system(CLASSIFIER_INSTRUCTION),
            Turn::user(format!("User text: \"{}\"", user_message)),
        ]
    }

    /// Interpret the raw classifier answer
    pub fn interpret(&self, raw: Option<&str>) -> Emotion {
        raw.map(Emotion::from_model_output).unwrap_or_default()
    }
}
