use serde::{Deserialize, Serialize};

/// Relative contribution of each risk factor to the local risk estimate.
///
/// Weights always sum to 1.0; [`RiskWeights::new`] renormalizes whatever it is given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskWeights {
    intensity: f64,
    emotion_type: f64,
    masking: f64,
    repetition: f64,
    trajectory: f64,
    urgency: f64,
}

impl RiskWeights {
    pub const STANDARD: RiskWeights = RiskWeights {
        intensity: 0.25,
        emotion_type: 0.20,
        masking: 0.15,
        repetition: 0.15,
        trajectory: 0.15,
        urgency: 0.10,
    };

    pub fn new(
        intensity: f64,
        emotion_type: f64,
        masking: f64,
        repetition: f64,
        trajectory: f64,
        urgency: f64,
    ) -> Self {
        let raw = [intensity, emotion_type, masking, repetition, trajectory, urgency];
        if raw.iter().any(|weight| !weight.is_finite() || *weight < 0.0) {
            return Self::STANDARD;
        }

        let total: f64 = raw.iter().sum();
        if total <= f64::EPSILON {
            return Self::STANDARD;
        }

        Self {
            intensity: intensity / total,
            emotion_type: emotion_type / total,
            masking: masking / total,
            repetition: repetition / total,
            trajectory: trajectory / total,
            urgency: urgency / total,
        }
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    pub fn emotion_type(&self) -> f64 {
        self.emotion_type
    }

    pub fn masking(&self) -> f64 {
        self.masking
    }

    pub fn repetition(&self) -> f64 {
        self.repetition
    }

    pub fn trajectory(&self) -> f64 {
        self.trajectory
    }

    pub fn urgency(&self) -> f64 {
        self.urgency
    }

    pub fn total(&self) -> f64 {
        self.intensity
            + self.emotion_type
            + self.masking
            + self.repetition
            + self.trajectory
            + self.urgency
    }
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Scoring rubric built once at startup and shared by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: RiskWeights,
    /// Share of the final risk taken from the model-supplied estimate when present.
    pub ai_blend_weight: f64,
    pub intervention_threshold: f64,
    pub high_risk_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: RiskWeights::STANDARD,
            ai_blend_weight: 0.4,
            intervention_threshold: 40.0,
            high_risk_threshold: 25.0,
        }
    }
}
