//! Wellness scoring core: emotion model, text signals, the risk scorer and
//! intervention selection, plus the service and HTTP surface composing them.
//!
//! Everything below `service` is synchronous and pure; the only I/O is the
//! language model call made through [`crate::analysis`].

pub mod breathing;
pub mod emotion;
pub mod interventions;
mod lenient;
pub mod router;
pub mod scoring;
pub mod service;
pub mod signals;

#[cfg(test)]
mod tests;

pub use breathing::{BreathingCategory, BreathingExercise, BreathingRecommendation};
pub use emotion::{Emotion, EmotionType, MaskingIndicator};
pub use interventions::{Intervention, InterventionSelector, InterventionType};
pub use router::wellness_router;
pub use scoring::{
    calculate_wellness_score, MoodSeedStage, RiskFactors, RiskScorer, RiskWeights, ScoringConfig,
    WellnessInputs, WellnessResult,
};
pub use service::{
    AnalysisResponse, ScoreResponse, ServiceOptions, VisualAnalysisResponse, WellnessService,
};
pub use signals::{EmotionalShift, QuickCheck, QuickTone, RepetitionReport};
