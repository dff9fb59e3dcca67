use std::sync::Arc;
use std::time::Instant;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::breathing::BreathingRecommendation;
use super::emotion::{Emotion, MaskingIndicator};
use super::interventions::{Intervention, InterventionSelector, HIGH_INTENSITY_THRESHOLD};
use super::scoring::{MoodSeedStage, RiskScorer, ScoringConfig, WellnessInputs, WellnessResult};
use super::signals::{
    analyze_repetition, detect_emotional_shift, quick_check, EmotionalShift, QuickCheck,
};
use crate::analysis::{CompletionClient, SentimentAnalyzer, SentimentReading, VisualMoodReading};
use crate::privacy::TextObfuscator;

/// Full analysis returned for one journal entry. Nothing in it is retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub wellness_score: f64,
    pub confidence: f64,
    pub primary_emotion: Emotion,
    pub secondary_emotions: Vec<Emotion>,
    pub emotional_intensity: f64,
    pub masking: MaskingIndicator,
    pub repetition_detected: bool,
    pub repeated_phrases: Vec<String>,
    pub emotional_shift: Option<EmotionalShift>,
    pub mood_seed_stage: MoodSeedStage,
    pub mood_color: String,
    pub needs_intervention: bool,
    pub high_risk: bool,
    pub recommended_interventions: Vec<Intervention>,
    pub supportive_message: String,
    pub breathing_exercise: Option<BreathingRecommendation>,
    pub therapeutic_insight: Option<String>,
    pub key_patterns: Vec<String>,
    pub data_stored: bool,
}

/// Pure scoring of caller-supplied signals, with the matching interventions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResponse {
    #[serde(flatten)]
    pub result: WellnessResult,
    pub intervention_priority: u8,
    pub recommended_interventions: Vec<Intervention>,
    pub data_stored: bool,
}

impl ScoreResponse {
    /// Score `inputs` and pick interventions without touching the model.
    pub fn evaluate(scorer: &RiskScorer, inputs: &WellnessInputs) -> Self {
        let result = scorer.calculate_wellness_score(inputs);
        let recommended_interventions = InterventionSelector::new().interventions(
            &inputs.primary_emotion,
            result.wellness_score,
            inputs.masking.detected,
            inputs.primary_emotion.intensity > HIGH_INTENSITY_THRESHOLD,
        );

        Self {
            intervention_priority: scorer.intervention_priority(result.wellness_score),
            result,
            recommended_interventions,
            data_stored: false,
        }
    }
}

/// Reading of an uploaded doodle or handwritten page. The image is not kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualAnalysisResponse {
    #[serde(flatten)]
    pub reading: VisualMoodReading,
    pub data_stored: bool,
}

/// Behavior switches for [`WellnessService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServiceOptions {
    /// Issue a second model call looking for masked emotions.
    pub detect_masking: bool,
}

/// Service composing redaction, model extraction, local signals, scoring and selection.
pub struct WellnessService<C> {
    obfuscator: TextObfuscator,
    analyzer: SentimentAnalyzer<C>,
    scorer: Arc<RiskScorer>,
    selector: InterventionSelector,
    options: ServiceOptions,
}

impl<C> WellnessService<C>
where
    C: CompletionClient + 'static,
{
    pub fn new(client: Arc<C>, config: ScoringConfig) -> Self {
        Self::with_options(client, config, ServiceOptions::default())
    }

    pub fn with_options(client: Arc<C>, config: ScoringConfig, options: ServiceOptions) -> Self {
        Self {
            obfuscator: TextObfuscator::new(),
            analyzer: SentimentAnalyzer::new(client),
            scorer: Arc::new(RiskScorer::new(config)),
            selector: InterventionSelector::new(),
            options,
        }
    }

    pub fn client(&self) -> &Arc<C> {
        self.analyzer.client()
    }

    pub fn scorer(&self) -> &RiskScorer {
        &self.scorer
    }

    pub fn options(&self) -> ServiceOptions {
        self.options
    }

    /// Analyze an entry with a freshly seeded random source.
    pub async fn analyze(&self, text: &str) -> AnalysisResponse {
        let mut rng = StdRng::from_rng(&mut rand::rng());
        self.analyze_with(text, &mut rng).await
    }

    pub async fn analyze_with<R>(&self, text: &str, rng: &mut R) -> AnalysisResponse
    where
        R: Rng + Send + ?Sized,
    {
        let started = Instant::now();
        let pii_found = self.obfuscator.detect_pii(text).len();
        let redacted = self.obfuscator.obfuscate(text);

        let (reading, masking) = if self.options.detect_masking {
            tokio::join!(
                self.analyzer.analyze_sentiment(&redacted),
                self.analyzer.detect_masking(&redacted)
            )
        } else {
            (
                self.analyzer.analyze_sentiment(&redacted).await,
                MaskingIndicator::default(),
            )
        };

        let response = self.compose(rng, &redacted, reading, masking);
        info!(
            text_chars = text.chars().count(),
            pii_found,
            wellness_score = response.wellness_score,
            stage = response.mood_seed_stage.label(),
            interventions = response.recommended_interventions.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "entry analyzed"
        );
        response
    }

    fn compose<R>(
        &self,
        rng: &mut R,
        redacted: &str,
        reading: SentimentReading,
        masking: MaskingIndicator,
    ) -> AnalysisResponse
    where
        R: Rng + ?Sized,
    {
        let repetition = analyze_repetition(redacted);
        let emotional_shift = detect_emotional_shift(redacted);
        let primary = reading.primary_emotion;

        let inputs = WellnessInputs {
            primary_emotion: primary,
            secondary_emotions: reading.secondary_emotions,
            emotional_tone: reading.emotional_tone,
            masking,
            repetition_detected: repetition.detected,
            emotional_shift,
            urgency_level: reading.urgency_level,
            risk_score_from_ai: Some(reading.risk_score),
        };
        let result = self.scorer.calculate_wellness_score(&inputs);

        let recommended_interventions = self.selector.interventions(
            &primary,
            result.wellness_score,
            inputs.masking.detected,
            primary.intensity > HIGH_INTENSITY_THRESHOLD,
        );
        let supportive_message = self.selector.supportive_message(
            rng,
            &primary,
            inputs.masking.detected,
            Some(reading.support_message.as_str()),
        );
        let breathing_exercise =
            self.selector
                .breathing_exercise(rng, redacted, &primary, reading.risk_score);

        AnalysisResponse {
            wellness_score: result.wellness_score,
            confidence: result.confidence,
            primary_emotion: primary,
            secondary_emotions: inputs.secondary_emotions,
            emotional_intensity: primary.intensity,
            masking: inputs.masking,
            repetition_detected: repetition.detected,
            repeated_phrases: repetition.repeated,
            emotional_shift,
            mood_seed_stage: result.mood_seed_stage,
            mood_color: result.mood_color,
            needs_intervention: result.needs_intervention,
            high_risk: result.high_risk,
            recommended_interventions,
            supportive_message,
            breathing_exercise,
            therapeutic_insight: Some(reading.therapeutic_insight)
                .filter(|insight| !insight.is_empty()),
            key_patterns: reading.key_patterns,
            data_stored: false,
        }
    }

    /// Lexicon-only tone estimate for live typing feedback; never calls the model.
    pub fn quick_check(&self, text: &str) -> QuickCheck {
        quick_check(text)
    }

    pub async fn release_affirmation(&self, text: &str) -> String {
        let redacted = self.obfuscator.obfuscate(text);
        self.analyzer.release_affirmation(&redacted).await
    }

    /// Read the emotional content of raw PNG or JPEG bytes.
    pub async fn analyze_visual(&self, image: &[u8]) -> VisualAnalysisResponse {
        let started = Instant::now();
        let reading = self.analyzer.analyze_visual_mood(STANDARD.encode(image)).await;
        info!(
            image_bytes = image.len(),
            visual_risk_score = reading.visual_risk_score,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "image analyzed"
        );
        VisualAnalysisResponse {
            reading,
            data_stored: false,
        }
    }

    pub fn score(&self, inputs: &WellnessInputs) -> ScoreResponse {
        ScoreResponse::evaluate(&self.scorer, inputs)
    }
}
