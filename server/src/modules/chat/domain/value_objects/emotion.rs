use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Emotion label
///
/// Value object: the closed label set the classifier is allowed to answer with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Neutral,
    Disgust,
    Tired,
}

impl Emotion {
    /// All labels, in the order they are listed to the classifier
    pub fn all() -> &'static [Emotion] {
        &[
            Emotion::Joy,
            Emotion::Sadness,
            Emotion::Anger,
            Emotion::Fear,
            Emotion::Surprise,
            Emotion::Neutral,
            Emotion::Disgust,
            Emotion::Tired,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
            Emotion::Fear => "fear",
            Emotion::Surprise => "surprise",
            Emotion::Neutral => "neutral",
            Emotion::Disgust => "disgust",
            Emotion::Tired => "tired",
        }
    }

    /// Normalize raw classifier output into a label
    ///
    /// Keeps only ASCII letters and lower-cases them. Empty output and words
    /// outside the closed label set (e.g. "Happy") become `Neutral`; unknown
    /// words are never passed through.
    pub fn from_model_output(raw: &str) -> Self {
        let label: String = raw
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_lowercase())
            .collect();

        label.parse().unwrap_or_default()
    }
}

impl Default for Emotion {
    fn default() -> Self {
        Self::Neutral
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emotion::all()
            .iter()
            .copied()
            .find(|e| e.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown emotion: {}", s))
    }
}
