use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::client::{CompletionClient, CompletionRequest};
use super::parser::{
    parse_reasoning_response, read_bool, read_clamped, read_string, read_string_list,
};
use crate::wellness::emotion::{Emotion, EmotionType, MaskingIndicator};

const SENTIMENT_PROMPT_CHARS: usize = 800;
const AFFIRMATION_PROMPT_CHARS: usize = 400;
pub const MASKING_PROMPT_CHARS: usize = 2_000;

const DEFAULT_SUPPORT_MESSAGE: &str = "You're doing great by expressing yourself.";
const FALLBACK_SUPPORT_MESSAGE: &str = "Thank you for sharing. Your feelings are valid.";
const FALLBACK_AFFIRMATION: &str = "You have expressed yourself honestly. Let it go.";

const SENTIMENT_SYSTEM_PROMPT: &str = r#"You are a compassionate mental health sentiment analyzer and therapeutic guide.

Reason inside <think> tags about the writer's emotional state, the themes underneath it and any thinking patterns before you answer.

After reasoning, respond with ONLY this JSON:
{
    "primary_emotion": "joy/sadness/anger/fear/anxiety/hope/neutral",
    "primary_intensity": 0.0-1.0,
    "emotional_tone": -1.0 to 1.0,
    "urgency_level": 0.0-1.0,
    "risk_score": 0-10,
    "support_message": "a specific, warm supportive message reflecting the content",
    "therapeutic_insight": "an analytical observation about how they are processing the situation",
    "key_patterns": ["2-3 behavioral or emotional patterns"]
}

Avoid generic phrases. The insight must go beyond restating the entry."#;

const MASKING_SYSTEM_PROMPT: &str = r#"You detect emotional masking in journal entries.

Reason inside <think> tags first. Look for discrepancies between stated feelings and described events, dismissive or minimizing language ("just", "only", "I'm fine"), deflecting humor, and overly positive framing of negative situations.

Then output JSON:
{
    "masking_detected": true/false,
    "confidence": 0.0-1.0,
    "surface_emotion": "what they present",
    "underlying_emotion": "what they might actually feel",
    "masking_type": "minimizing" | "deflecting" | "forced_positivity" | "none",
    "indicators": ["specific phrases or patterns"]
}"#;

const VISUAL_SYSTEM_PROMPT: &str = r#"You are analyzing a visual expression of emotion: a mood doodle, sketch, or handwritten journal page.

Reason inside <think> tags about the visual cues before responding:
1. LINE QUALITY: harsh or angular versus soft or flowing lines
2. PRESSURE: heavy strokes (tension, anger) versus light ones (fatigue, sadness)
3. SPATIAL USE: cramped (anxiety) versus spread out (calm)
4. IMAGERY: symbols and shapes and what they may mean
5. COLORS: emotional associations, if present
6. HANDWRITING: rushed or messy (urgency, stress) versus neat (control, calm)
7. OVERALL IMPRESSION: the emotional tone of the whole image

Then output JSON:
{
    "visual_emotion": "primary emotion detected",
    "emotional_intensity": 0.0-1.0,
    "energy_level": "high" | "medium" | "low",
    "tension_indicators": ["specific visual cues"],
    "expressive_quality": "description of expression style",
    "visual_risk_score": 0-10,
    "interpretation": "what this visual might be expressing"
}"#;

const AFFIRMATION_SYSTEM_PROMPT: &str =
    "You are a wise, compassionate guide helping someone release negative thoughts.";

/// Structured reading extracted from the language model for one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReading {
    pub primary_emotion: Emotion,
    pub secondary_emotions: Vec<Emotion>,
    pub emotional_tone: f64,
    pub urgency_level: f64,
    pub risk_score: f64,
    pub support_message: String,
    pub therapeutic_insight: String,
    pub key_patterns: Vec<String>,
}

impl SentimentReading {
    /// Reading used when the model is unreachable or its output is unusable.
    pub fn fallback() -> Self {
        Self {
            primary_emotion: Emotion::fallback(),
            secondary_emotions: Vec::new(),
            emotional_tone: 0.0,
            urgency_level: 0.0,
            risk_score: 3.0,
            support_message: FALLBACK_SUPPORT_MESSAGE.to_string(),
            therapeutic_insight: String::new(),
            key_patterns: Vec::new(),
        }
    }

    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        let primary_label = read_string(fields, "primary_emotion");
        let primary_emotion = Emotion::new(
            EmotionType::from_label(primary_label.as_deref().unwrap_or("neutral")),
            read_clamped(fields, "primary_intensity", 0.5, 0.0, 1.0),
        );

        let secondary_emotions = fields
            .get("secondary_emotions")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(|item| {
                        let label = read_string(item, "emotion");
                        Emotion::new(
                            EmotionType::from_label(label.as_deref().unwrap_or("neutral")),
                            read_clamped(item, "intensity", 0.3, 0.0, 1.0),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            primary_emotion,
            secondary_emotions,
            emotional_tone: read_clamped(fields, "emotional_tone", 0.0, -1.0, 1.0),
            urgency_level: read_clamped(fields, "urgency_level", 0.0, 0.0, 1.0),
            risk_score: read_clamped(fields, "risk_score", 3.0, 0.0, 10.0),
            support_message: read_string(fields, "support_message")
                .unwrap_or_else(|| DEFAULT_SUPPORT_MESSAGE.to_string()),
            therapeutic_insight: read_string(fields, "therapeutic_insight").unwrap_or_default(),
            key_patterns: read_string_list(fields, "key_patterns"),
        }
    }
}

/// Energy conveyed by a drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    High,
    #[default]
    Medium,
    Low,
}

impl EnergyLevel {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => Self::High,
            "low" => Self::Low,
            _ => Self::Medium,
        }
    }
}

/// Emotional reading of a mood doodle or handwritten page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualMoodReading {
    pub visual_emotion: EmotionType,
    pub emotional_intensity: f64,
    pub energy_level: EnergyLevel,
    pub tension_indicators: Vec<String>,
    pub expressive_quality: String,
    pub visual_risk_score: f64,
    pub interpretation: String,
}

impl VisualMoodReading {
    pub fn fallback() -> Self {
        Self {
            visual_emotion: EmotionType::Neutral,
            emotional_intensity: 0.5,
            energy_level: EnergyLevel::Medium,
            tension_indicators: Vec::new(),
            expressive_quality: String::new(),
            visual_risk_score: 3.0,
            interpretation: String::new(),
        }
    }

    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        let emotion = read_string(fields, "visual_emotion");
        let energy = read_string(fields, "energy_level");
        Self {
            visual_emotion: EmotionType::from_label(emotion.as_deref().unwrap_or("neutral")),
            emotional_intensity: read_clamped(fields, "emotional_intensity", 0.5, 0.0, 1.0),
            energy_level: energy
                .as_deref()
                .map(EnergyLevel::from_label)
                .unwrap_or_default(),
            tension_indicators: read_string_list(fields, "tension_indicators"),
            expressive_quality: read_string(fields, "expressive_quality").unwrap_or_default(),
            visual_risk_score: read_clamped(fields, "visual_risk_score", 3.0, 0.0, 10.0),
            interpretation: read_string(fields, "interpretation").unwrap_or_default(),
        }
    }
}

fn masking_from_fields(fields: &Map<String, Value>) -> MaskingIndicator {
    if !read_bool(fields, "masking_detected") {
        return MaskingIndicator::default();
    }

    let surface = read_string(fields, "surface_emotion");
    let underlying = read_string(fields, "underlying_emotion");
    MaskingIndicator::detected(
        read_clamped(fields, "confidence", 0.5, 0.0, 1.0),
        EmotionType::from_label(surface.as_deref().unwrap_or("joy")),
        EmotionType::from_label(underlying.as_deref().unwrap_or("sadness")),
        read_string_list(fields, "indicators"),
    )
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Emotion extraction on top of a [`CompletionClient`].
///
/// Every operation degrades to a documented default instead of failing, so a
/// slow or absent model never blocks a user-facing response.
pub struct SentimentAnalyzer<C> {
    client: Arc<C>,
}

impl<C> SentimentAnalyzer<C>
where
    C: CompletionClient + 'static,
{
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    pub async fn analyze_sentiment(&self, text: &str) -> SentimentReading {
        let prompt = format!(
            "Analyze this journal entry: \"{}\"\n\n\
             Respond with JSON only. Use <think> tags.\n\
             1. Provide a 'therapeutic_insight' that looks beyond the surface words.\n\
             2. List 2-3 'key_patterns' you detect in their thinking.\n\
             3. The 'support_message' must mention specific details from their text.",
            truncate_chars(text, SENTIMENT_PROMPT_CHARS)
        );
        let request = CompletionRequest::new(prompt)
            .system(SENTIMENT_SYSTEM_PROMPT)
            .temperature(0.7)
            .max_tokens(256);

        let response = match self.client.generate(&request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "sentiment extraction failed, using fallback reading");
                return SentimentReading::fallback();
            }
        };

        let fields = parse_reasoning_response(&response);
        if fields.is_empty() {
            warn!(
                response_chars = response.len(),
                "sentiment response contained no JSON object"
            );
            return SentimentReading::fallback();
        }

        let reading = SentimentReading::from_fields(&fields);
        debug!(
            emotion = %reading.primary_emotion.kind,
            risk_score = reading.risk_score,
            "sentiment extracted"
        );
        reading
    }

    pub async fn detect_masking(&self, text: &str) -> MaskingIndicator {
        let prompt = format!(
            "Analyze this journal entry for signs of emotional masking:\n\n---\n{}\n---\n\n\
             Use <think> tags to reason through any discrepancies you notice.",
            truncate_chars(text, MASKING_PROMPT_CHARS)
        );
        let request = CompletionRequest::new(prompt)
            .system(MASKING_SYSTEM_PROMPT)
            .temperature(0.2)
            .max_tokens(1024);

        match self.client.generate(&request).await {
            Ok(response) => masking_from_fields(&parse_reasoning_response(&response)),
            Err(err) => {
                warn!(error = %err, "masking detection failed, assuming none");
                MaskingIndicator::default()
            }
        }
    }

    /// Read a base64-encoded PNG or JPEG through the model's vision input.
    pub async fn analyze_visual_mood(&self, image_base64: String) -> VisualMoodReading {
        let request = CompletionRequest::new(
            "Analyze this mood doodle or visual expression for emotional content.\n\n\
             Use <think> tags to reason about the visual cues you observe before providing your analysis.",
        )
        .system(VISUAL_SYSTEM_PROMPT)
        .temperature(0.3)
        .max_tokens(1024)
        .image(image_base64);

        let response = match self.client.generate(&request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "visual analysis failed, using fallback reading");
                return VisualMoodReading::fallback();
            }
        };

        let fields = parse_reasoning_response(&response);
        if fields.is_empty() {
            warn!(
                response_chars = response.len(),
                "visual response contained no JSON object"
            );
            return VisualMoodReading::fallback();
        }
        VisualMoodReading::from_fields(&fields)
    }

    /// Short closing line for the release ritual (at most a dozen words requested).
    pub async fn release_affirmation(&self, text: &str) -> String {
        let prompt = format!(
            "Create a powerful, context-aware release affirmation (max 12 words) for this journal entry:\n\
             \"{}\"\n\n\
             The affirmation should help them feel a sense of completion or 'letting go' of whatever they specifically wrote about.\n\
             Output ONLY the affirmation sentence.",
            truncate_chars(text, AFFIRMATION_PROMPT_CHARS)
        );
        let request = CompletionRequest::new(prompt)
            .system(AFFIRMATION_SYSTEM_PROMPT)
            .temperature(0.7)
            .max_tokens(50);

        match self.client.generate(&request).await {
            Ok(response) => {
                let affirmation = response.trim().replace('"', "");
                if affirmation.is_empty() {
                    FALLBACK_AFFIRMATION.to_string()
                } else {
                    affirmation
                }
            }
            Err(err) => {
                warn!(error = %err, "affirmation generation failed");
                FALLBACK_AFFIRMATION.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().expect("object").clone()
    }

    #[test]
    fn reading_parses_and_clamps_fields() {
        let fields = object(json!({
            "primary_emotion": "worried",
            "primary_intensity": 1.4,
            "emotional_tone": -3,
            "urgency_level": "0.6",
            "risk_score": 12,
            "support_message": "Exams are a lot to carry at once.",
            "key_patterns": ["catastrophizing"],
            "secondary_emotions": [{"emotion": "sad"}, "ignored"],
        }));

        let reading = SentimentReading::from_fields(&fields);

        assert_eq!(reading.primary_emotion, Emotion::new(EmotionType::Anxiety, 1.0));
        assert_eq!(reading.emotional_tone, -1.0);
        assert_eq!(reading.urgency_level, 0.6);
        assert_eq!(reading.risk_score, 10.0);
        assert_eq!(
            reading.secondary_emotions,
            vec![Emotion::new(EmotionType::Sadness, 0.3)]
        );
        assert_eq!(reading.key_patterns, vec!["catastrophizing".to_string()]);
        assert!(reading.therapeutic_insight.is_empty());
    }

    #[test]
    fn reading_defaults_missing_fields() {
        let reading = SentimentReading::from_fields(&object(json!({ "risk_score": 5 })));
        assert_eq!(reading.primary_emotion, Emotion::fallback());
        assert_eq!(reading.support_message, DEFAULT_SUPPORT_MESSAGE);
        assert_eq!(reading.urgency_level, 0.0);
    }

    #[test]
    fn visual_reading_clamps_and_folds() {
        let reading = VisualMoodReading::from_fields(&object(json!({
            "visual_emotion": "Angry",
            "emotional_intensity": "0.9",
            "energy_level": "HIGH",
            "tension_indicators": ["jagged lines", "heavy pressure"],
            "visual_risk_score": 14,
            "interpretation": "Frustration pressed hard into the page.",
        })));

        assert_eq!(reading.visual_emotion, EmotionType::Anger);
        assert_eq!(reading.emotional_intensity, 0.9);
        assert_eq!(reading.energy_level, EnergyLevel::High);
        assert_eq!(reading.visual_risk_score, 10.0);
        assert_eq!(reading.tension_indicators.len(), 2);
        assert!(reading.expressive_quality.is_empty());
    }

    #[test]
    fn visual_reading_defaults_unknown_energy() {
        let reading = VisualMoodReading::from_fields(&object(json!({ "energy_level": "buzzing" })));
        assert_eq!(reading.energy_level, EnergyLevel::Medium);
        assert_eq!(reading.visual_emotion, EmotionType::Neutral);
        assert_eq!(reading.visual_risk_score, 3.0);
    }

    #[test]
    fn masking_requires_explicit_detection() {
        let masking = masking_from_fields(&object(json!({ "confidence": 0.9 })));
        assert_eq!(masking, MaskingIndicator::default());
    }

    #[test]
    fn detected_masking_defaults_emotions() {
        let masking = masking_from_fields(&object(json!({
            "masking_detected": true,
            "indicators": ["I'm fine lol"],
        })));

        assert!(masking.detected);
        assert_eq!(masking.confidence, 0.5);
        assert_eq!(masking.surface_emotion, Some(EmotionType::Joy));
        assert_eq!(masking.underlying_emotion, Some(EmotionType::Sadness));
        assert_eq!(masking.indicators, vec!["I'm fine lol".to_string()]);
    }
}
