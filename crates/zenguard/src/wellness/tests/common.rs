use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;

use crate::analysis::{AnalysisError, CompletionClient, CompletionRequest};
use crate::wellness::emotion::{Emotion, EmotionType, MaskingIndicator};
use crate::wellness::scoring::{ScoringConfig, WellnessInputs};
use crate::wellness::service::{ServiceOptions, WellnessService};
use crate::wellness::signals::EmotionalShift;

pub(super) const ANXIOUS_READING: &str = r#"<think>
The writer keeps returning to the exam and sounds exhausted.
</think>
```json
{
    "primary_emotion": "anxious",
    "primary_intensity": 0.85,
    "secondary_emotions": [{"emotion": "sadness", "intensity": 0.4}],
    "emotional_tone": -0.6,
    "urgency_level": 0.5,
    "risk_score": 6,
    "support_message": "Preparing for this exam while feeling this tired is a lot.",
    "therapeutic_insight": "Worry about the outcome is crowding out rest.",
    "key_patterns": ["catastrophizing", "sleep loss"]
}
```"#;

pub(super) const MASKED_READING: &str = r#"{
    "masking_detected": true,
    "confidence": 0.9,
    "surface_emotion": "happy",
    "underlying_emotion": "sad",
    "masking_type": "minimizing",
    "indicators": ["it's fine lol"]
}"#;

pub(super) const DOODLE_READING: &str = r#"<think>Heavy, jagged strokes crowd the corner.</think>
{
    "visual_emotion": "angry",
    "emotional_intensity": 0.8,
    "energy_level": "high",
    "tension_indicators": ["jagged lines", "cramped corner"],
    "expressive_quality": "pressed hard, fast strokes",
    "visual_risk_score": 12,
    "interpretation": "Frustration that has nowhere to go."
}"#;

/// PNG signature followed by the start of an IHDR chunk.
pub(super) const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

pub(super) const MASKING_SUFFIX: &str =
    " Remember, it's okay to not be okay. You don't have to hide how you truly feel.";

/// In-memory model that answers by prompt kind and records every request.
#[derive(Default)]
pub(super) struct ScriptedClient {
    sentiment: Option<String>,
    masking: Option<String>,
    affirmation: Option<String>,
    visual: Option<String>,
    healthy: bool,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedClient {
    pub(super) fn offline() -> Self {
        Self::default()
    }

    pub(super) fn with_sentiment(mut self, reply: &str) -> Self {
        self.sentiment = Some(reply.to_string());
        self.healthy = true;
        self
    }

    pub(super) fn with_masking(mut self, reply: &str) -> Self {
        self.masking = Some(reply.to_string());
        self
    }

    pub(super) fn with_affirmation(mut self, reply: &str) -> Self {
        self.affirmation = Some(reply.to_string());
        self
    }

    pub(super) fn with_visual(mut self, reply: &str) -> Self {
        self.visual = Some(reply.to_string());
        self
    }

    pub(super) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().expect("request log poisoned").clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn generate(&self, request: &CompletionRequest) -> Result<String, AnalysisError> {
        self.requests
            .lock()
            .expect("request log poisoned")
            .push(request.clone());

        let system = request.system_prompt.as_deref().unwrap_or_default();
        let reply = if system.contains("doodle") {
            &self.visual
        } else if system.contains("masking") {
            &self.masking
        } else if system.contains("release") {
            &self.affirmation
        } else {
            &self.sentiment
        };

        reply
            .clone()
            .ok_or_else(|| AnalysisError::Transport("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }
}

pub(super) fn build_service(client: ScriptedClient) -> WellnessService<ScriptedClient> {
    WellnessService::new(Arc::new(client), ScoringConfig::default())
}

pub(super) fn build_masking_service(client: ScriptedClient) -> WellnessService<ScriptedClient> {
    WellnessService::with_options(
        Arc::new(client),
        ScoringConfig::default(),
        ServiceOptions {
            detect_masking: true,
        },
    )
}

pub(super) fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

pub(super) fn emotion(kind: EmotionType, intensity: f64) -> Emotion {
    Emotion::new(kind, intensity)
}

pub(super) fn masking(confidence: f64) -> MaskingIndicator {
    MaskingIndicator::detected(
        confidence,
        EmotionType::Joy,
        EmotionType::Sadness,
        vec!["I'm fine".to_string()],
    )
}

pub(super) fn joyful_inputs() -> WellnessInputs {
    WellnessInputs {
        emotional_shift: Some(EmotionalShift::Improving),
        ..WellnessInputs::new(emotion(EmotionType::Joy, 0.9))
    }
}

pub(super) fn anxiety_spiral_inputs() -> WellnessInputs {
    WellnessInputs {
        masking: masking(0.9),
        repetition_detected: true,
        emotional_shift: Some(EmotionalShift::Declining),
        urgency_level: 0.9,
        risk_score_from_ai: Some(9.0),
        ..WellnessInputs::new(emotion(EmotionType::Anxiety, 0.9))
    }
}

/// Every combination of the discrete inputs the scorer branches on.
pub(super) fn input_grid() -> Vec<WellnessInputs> {
    let mut grid = Vec::new();
    for kind in EmotionType::ALL {
        for intensity in [0.0, 0.35, 0.75, 1.0] {
            for mask in [MaskingIndicator::default(), masking(0.4), masking(1.0)] {
                for shift in [
                    None,
                    Some(EmotionalShift::Improving),
                    Some(EmotionalShift::Stable),
                    Some(EmotionalShift::Declining),
                ] {
                    for ai in [None, Some(0.0), Some(5.0), Some(10.0)] {
                        grid.push(WellnessInputs {
                            secondary_emotions: if intensity > 0.5 {
                                vec![emotion(EmotionType::Sadness, 0.3)]
                            } else {
                                Vec::new()
                            },
                            masking: mask.clone(),
                            repetition_detected: intensity >= 0.75,
                            emotional_shift: shift,
                            urgency_level: intensity,
                            risk_score_from_ai: ai,
                            ..WellnessInputs::new(emotion(kind, intensity))
                        });
                    }
                }
            }
        }
    }
    grid
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
