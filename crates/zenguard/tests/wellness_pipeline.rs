use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use zenguard::analysis::{AnalysisError, CompletionClient, CompletionRequest};
use zenguard::privacy::TextObfuscator;
use zenguard::wellness::{
    calculate_wellness_score, Emotion, EmotionType, EmotionalShift, MaskingIndicator,
    MoodSeedStage, RiskScorer, ScoreResponse, ScoringConfig, WellnessInputs, WellnessService,
};

const SAD_READING: &str = r#"{
    "primary_emotion": "sad",
    "primary_intensity": 0.6,
    "support_message": "It sounds like this week has been heavy to carry."
}"#;

/// Answers every prompt with the same reply and keeps the prompts it saw.
struct EchoModel {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl EchoModel {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }
}

#[async_trait]
impl CompletionClient for EchoModel {
    async fn generate(&self, request: &CompletionRequest) -> Result<String, AnalysisError> {
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(request.prompt.clone());
        Ok(self.reply.clone())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[test]
fn identifying_details_are_replaced_with_tokens() {
    let obfuscator = TextObfuscator::new();

    let redacted =
        obfuscator.obfuscate("Email me at sam@example.org or call 555-123-4567 before 12/05/2024.");

    assert_eq!(
        redacted,
        "Email me at [EMAIL] or call [PHONE] before [DATE]."
    );
    assert!(obfuscator
        .obfuscate("Everyone at Riverside University seems fine")
        .contains("[SCHOOL]"));
    assert_eq!(obfuscator.privacy_score("nothing identifying here"), 0.0);
}

#[test]
fn free_function_and_scorer_agree() {
    let primary = Emotion::new(EmotionType::Fear, 0.8);
    let masking = MaskingIndicator::default();

    let direct = calculate_wellness_score(
        primary,
        &[],
        0.0,
        &masking,
        false,
        Some(EmotionalShift::Stable),
        0.4,
        Some(6.0),
    );
    let inputs = WellnessInputs {
        emotional_shift: Some(EmotionalShift::Stable),
        urgency_level: 0.4,
        risk_score_from_ai: Some(6.0),
        ..WellnessInputs::new(primary)
    };

    assert_eq!(
        direct,
        RiskScorer::new(ScoringConfig::default()).calculate_wellness_score(&inputs)
    );
    assert_eq!(direct.mood_seed_stage, MoodSeedStage::from_score(direct.wellness_score));
}

#[test]
fn score_response_never_claims_storage() {
    let inputs = WellnessInputs {
        emotional_shift: Some(EmotionalShift::Improving),
        ..WellnessInputs::new(Emotion::new(EmotionType::Hope, 0.7))
    };

    let response = ScoreResponse::evaluate(&RiskScorer::default(), &inputs);

    assert!(!response.data_stored);
    assert!(!response.recommended_interventions.is_empty());
    assert!(response.recommended_interventions.len() <= 3);
    assert!((1..=5).contains(&response.intervention_priority));
}

#[tokio::test]
async fn analysis_only_ever_sends_redacted_text() {
    let model = Arc::new(EchoModel::new(SAD_READING));
    let service = WellnessService::new(model.clone(), ScoringConfig::default());

    let response = service
        .analyze("I emailed sam@example.org three times and nobody replied.")
        .await;

    assert_eq!(response.primary_emotion, Emotion::new(EmotionType::Sadness, 0.6));
    assert_eq!(
        response.supportive_message,
        "It sounds like this week has been heavy to carry."
    );
    assert!(!response.data_stored);

    let prompts = model.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("[EMAIL]"));
    assert!(!prompts[0].contains("sam@example.org"));
}
