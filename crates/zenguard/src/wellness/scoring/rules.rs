use super::super::emotion::{clamp_unit, EmotionType, MaskingIndicator};
use super::super::signals::EmotionalShift;
use super::config::RiskWeights;
use super::{RiskFactors, WellnessInputs};

/// Baseline risk used for emotions without a stronger or weaker association.
pub const DEFAULT_BASE_RISK: f64 = 0.3;

const MASKING_SCALE: f64 = 0.8;
const REPETITION_RISK: f64 = 0.6;
const AI_RISK_SCALE: f64 = 10.0;

/// Intensity-independent risk carried by the emotion category itself.
pub fn base_risk(kind: EmotionType) -> f64 {
    match kind {
        EmotionType::Joy => 0.0,
        EmotionType::Hope => 0.1,
        EmotionType::Surprise => 0.2,
        EmotionType::Neutral => DEFAULT_BASE_RISK,
        EmotionType::Disgust => 0.4,
        EmotionType::Anger => 0.5,
        EmotionType::Sadness => 0.6,
        EmotionType::Fear | EmotionType::Anxiety => 0.7,
    }
}

pub fn trajectory_risk(shift: Option<EmotionalShift>) -> f64 {
    match shift {
        Some(EmotionalShift::Improving) => 0.0,
        Some(EmotionalShift::Stable) | None => 0.3,
        Some(EmotionalShift::Declining) => 0.8,
    }
}

fn masking_risk(masking: &MaskingIndicator) -> f64 {
    masking.effective_confidence() * MASKING_SCALE
}

pub(crate) fn score_factors(inputs: &WellnessInputs) -> RiskFactors {
    let base = base_risk(inputs.primary_emotion.kind);
    let intensity = clamp_unit(inputs.primary_emotion.intensity);

    RiskFactors {
        intensity: intensity * base,
        emotion_type: base,
        masking: masking_risk(&inputs.masking),
        repetition: if inputs.repetition_detected {
            REPETITION_RISK
        } else {
            0.0
        },
        trajectory: trajectory_risk(inputs.emotional_shift),
        urgency: clamp_unit(inputs.urgency_level),
    }
}

pub(crate) fn weighted_risk(factors: &RiskFactors, weights: &RiskWeights) -> f64 {
    factors.intensity * weights.intensity()
        + factors.emotion_type * weights.emotion_type()
        + factors.masking * weights.masking()
        + factors.repetition * weights.repetition()
        + factors.trajectory * weights.trajectory()
        + factors.urgency * weights.urgency()
}

/// Fold the model-supplied 0-10 estimate into the local risk.
pub(crate) fn blend_ai_risk(local: f64, ai_score: Option<f64>, ai_weight: f64) -> f64 {
    match ai_score {
        Some(score) => {
            let ai_weight = clamp_unit(ai_weight);
            let normalized = clamp_unit(score / AI_RISK_SCALE);
            local * (1.0 - ai_weight) + normalized * ai_weight
        }
        None => local,
    }
}

pub(crate) fn confidence(inputs: &WellnessInputs) -> f64 {
    let mut confidence = 0.5;
    confidence += clamp_unit(inputs.primary_emotion.intensity) * 0.2;
    if !inputs.secondary_emotions.is_empty() {
        confidence += 0.1;
    }
    // An undetected mask still counts as a moderately confident negative.
    let masking_confidence = if inputs.masking.detected {
        clamp_unit(inputs.masking.confidence)
    } else {
        0.5
    };
    confidence += masking_confidence * 0.1;
    if inputs.emotional_shift.is_some() {
        confidence += 0.1;
    }
    confidence.min(0.95)
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
