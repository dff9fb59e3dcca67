use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::lenient;

/// Closed set of emotion categories recognised by the scoring pipeline.
///
/// Deserializes through [`EmotionType::from_label`], so any label is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionType {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Disgust,
    Neutral,
    Anxiety,
    Hope,
}

impl EmotionType {
    pub const ALL: [EmotionType; 9] = [
        EmotionType::Joy,
        EmotionType::Sadness,
        EmotionType::Anger,
        EmotionType::Fear,
        EmotionType::Surprise,
        EmotionType::Disgust,
        EmotionType::Neutral,
        EmotionType::Anxiety,
        EmotionType::Hope,
    ];

    /// Map a free-form label (as produced by a language model) onto the closed set.
    ///
    /// Synonyms such as `happy`, `worried` or `afraid` are folded into their
    /// category; anything unrecognised becomes [`EmotionType::Neutral`].
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "joy" | "happy" | "happiness" => Self::Joy,
            "sadness" | "sad" => Self::Sadness,
            "anger" | "angry" => Self::Anger,
            "fear" | "scared" | "afraid" => Self::Fear,
            "surprise" | "surprised" => Self::Surprise,
            "disgust" | "disgusted" => Self::Disgust,
            "anxiety" | "anxious" | "worried" => Self::Anxiety,
            "hope" | "hopeful" => Self::Hope,
            _ => Self::Neutral,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Joy => "joy",
            Self::Sadness => "sadness",
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Surprise => "surprise",
            Self::Disgust => "disgust",
            Self::Neutral => "neutral",
            Self::Anxiety => "anxiety",
            Self::Hope => "hope",
        }
    }
}

impl<'de> Deserialize<'de> for EmotionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        lenient::emotion_type(deserializer)
    }
}

impl fmt::Display for EmotionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Single emotion reading with an intensity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Emotion {
    #[serde(rename = "type")]
    pub kind: EmotionType,
    #[serde(default = "default_intensity", deserialize_with = "lenient::unit")]
    pub intensity: f64,
}

fn default_intensity() -> f64 {
    0.5
}

impl Emotion {
    pub fn new(kind: EmotionType, intensity: f64) -> Self {
        Self {
            kind,
            intensity: clamp_unit(intensity),
        }
    }

    /// Reading used whenever upstream extraction fails.
    pub fn fallback() -> Self {
        Self::new(EmotionType::Neutral, 0.5)
    }
}

/// Discrepancy between a presented emotion and an inferred underlying one.
///
/// When `detected` is false the remaining fields carry no meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaskingIndicator {
    #[serde(default)]
    pub detected: bool,
    #[serde(default, deserialize_with = "lenient::unit")]
    pub confidence: f64,
    #[serde(default)]
    pub surface_emotion: Option<EmotionType>,
    #[serde(default)]
    pub underlying_emotion: Option<EmotionType>,
    #[serde(default)]
    pub indicators: Vec<String>,
}

impl MaskingIndicator {
    pub fn detected(
        confidence: f64,
        surface_emotion: EmotionType,
        underlying_emotion: EmotionType,
        indicators: Vec<String>,
    ) -> Self {
        Self {
            detected: true,
            confidence: clamp_unit(confidence),
            surface_emotion: Some(surface_emotion),
            underlying_emotion: Some(underlying_emotion),
            indicators,
        }
    }

    /// Confidence to use in scoring, zero when nothing was detected.
    pub fn effective_confidence(&self) -> f64 {
        if self.detected {
            clamp_unit(self.confidence)
        } else {
            0.0
        }
    }
}

/// Clamp into `[min, max]`; NaN resolves to the midpoint of the range.
pub fn saturate(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return (min + max) / 2.0;
    }
    value.clamp(min, max)
}

pub fn clamp_unit(value: f64) -> f64 {
    saturate(value, 0.0, 1.0)
}
