mod config;
mod policy;
mod rules;

pub use config::{RiskWeights, ScoringConfig};
pub use policy::{intervention_priority, MoodSeedStage};
pub use rules::{base_risk, trajectory_risk, DEFAULT_BASE_RISK};

use super::emotion::{saturate, Emotion, MaskingIndicator};
use super::lenient;
use super::signals::EmotionalShift;
use serde::{Deserialize, Serialize};

/// Everything the scorer needs for one text submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessInputs {
    pub primary_emotion: Emotion,
    #[serde(default)]
    pub secondary_emotions: Vec<Emotion>,
    /// Accepted for compatibility; not a factor in the risk blend.
    #[serde(default, deserialize_with = "lenient::tone")]
    pub emotional_tone: f64,
    #[serde(default)]
    pub masking: MaskingIndicator,
    #[serde(default)]
    pub repetition_detected: bool,
    #[serde(default, deserialize_with = "lenient::shift")]
    pub emotional_shift: Option<EmotionalShift>,
    #[serde(default, deserialize_with = "lenient::unit")]
    pub urgency_level: f64,
    #[serde(default, deserialize_with = "lenient::ai_risk")]
    pub risk_score_from_ai: Option<f64>,
}

impl WellnessInputs {
    pub fn new(primary_emotion: Emotion) -> Self {
        Self {
            primary_emotion,
            secondary_emotions: Vec::new(),
            emotional_tone: 0.0,
            masking: MaskingIndicator::default(),
            repetition_detected: false,
            emotional_shift: None,
            urgency_level: 0.0,
            risk_score_from_ai: None,
        }
    }
}

/// The six named contributions, each in `[0, 1]`, in blend order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskFactors {
    pub intensity: f64,
    pub emotion_type: f64,
    pub masking: f64,
    pub repetition: f64,
    pub trajectory: f64,
    pub urgency: f64,
}

impl RiskFactors {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("intensity", self.intensity),
            ("emotion_type", self.emotion_type),
            ("masking", self.masking),
            ("repetition", self.repetition),
            ("trajectory", self.trajectory),
            ("urgency", self.urgency),
        ]
        .into_iter()
    }
}

/// Scoring output for a single request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessResult {
    pub wellness_score: f64,
    pub confidence: f64,
    pub risk_factors: RiskFactors,
    pub mood_seed_stage: MoodSeedStage,
    pub mood_color: String,
    pub needs_intervention: bool,
    pub high_risk: bool,
}

/// Stateless scorer applying an immutable rubric.
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    config: ScoringConfig,
}

impl RiskScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn calculate_wellness_score(&self, inputs: &WellnessInputs) -> WellnessResult {
        let risk_factors = rules::score_factors(inputs);
        let local_risk = rules::weighted_risk(&risk_factors, &self.config.weights);
        let final_risk = rules::blend_ai_risk(
            local_risk,
            inputs.risk_score_from_ai,
            self.config.ai_blend_weight,
        );

        let wellness_score = rules::round_to(saturate((1.0 - final_risk) * 100.0, 0.0, 100.0), 1);
        let confidence = rules::round_to(rules::confidence(inputs), 2);
        let mood_seed_stage = MoodSeedStage::from_score(wellness_score);

        WellnessResult {
            wellness_score,
            confidence,
            risk_factors,
            mood_seed_stage,
            mood_color: mood_seed_stage.color().to_string(),
            needs_intervention: wellness_score < self.config.intervention_threshold,
            high_risk: wellness_score < self.config.high_risk_threshold,
        }
    }

    pub fn intervention_priority(&self, wellness_score: f64) -> u8 {
        intervention_priority(wellness_score)
    }
}

/// Convenience wrapper that scores with the standard rubric.
#[allow(clippy::too_many_arguments)]
pub fn calculate_wellness_score(
    primary_emotion: Emotion,
    secondary_emotions: &[Emotion],
    emotional_tone: f64,
    masking: &MaskingIndicator,
    repetition_detected: bool,
    emotional_shift: Option<EmotionalShift>,
    urgency_level: f64,
    risk_score_from_ai: Option<f64>,
) -> WellnessResult {
    let inputs = WellnessInputs {
        primary_emotion,
        secondary_emotions: secondary_emotions.to_vec(),
        emotional_tone,
        masking: masking.clone(),
        repetition_detected,
        emotional_shift,
        urgency_level,
        risk_score_from_ai,
    };
    RiskScorer::default().calculate_wellness_score(&inputs)
}
