use crate::infra::{parse_ai_risk, parse_emotion, parse_secondary, parse_shift, parse_unit};
use clap::Args;
use zenguard::error::AppError;
use zenguard::wellness::{
    Emotion, EmotionType, EmotionalShift, MaskingIndicator, RiskScorer, ScoreResponse,
    WellnessInputs,
};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Primary emotion (joy, sadness, anger, fear, surprise, disgust, neutral, anxiety, hope)
    #[arg(long, value_parser = parse_emotion)]
    pub(crate) emotion: EmotionType,
    /// Intensity of the primary emotion in [0, 1]
    #[arg(long, default_value = "0.5", value_parser = parse_unit)]
    pub(crate) intensity: f64,
    /// Secondary emotion as LABEL:INTENSITY; may be repeated
    #[arg(long = "secondary", value_parser = parse_secondary)]
    pub(crate) secondary: Vec<Emotion>,
    /// How pressing the writer sounds, in [0, 1]
    #[arg(long, default_value = "0", value_parser = parse_unit)]
    pub(crate) urgency: f64,
    /// Model-provided risk estimate on a 0-10 scale
    #[arg(long, value_parser = parse_ai_risk)]
    pub(crate) ai_risk: Option<f64>,
    /// Treat the primary emotion as masking distress with this confidence
    #[arg(long, value_parser = parse_unit)]
    pub(crate) masking_confidence: Option<f64>,
    /// Whether the entry kept circling the same words
    #[arg(long)]
    pub(crate) repetition: bool,
    /// Direction of the emotional shift (improving, stable, declining)
    #[arg(long, value_parser = parse_shift)]
    pub(crate) shift: Option<EmotionalShift>,
    /// Emit the full result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl ScoreArgs {
    fn inputs(&self) -> WellnessInputs {
        let primary = Emotion::new(self.emotion, self.intensity);
        let masking = match self.masking_confidence {
            Some(confidence) => MaskingIndicator {
                detected: true,
                confidence,
                surface_emotion: Some(self.emotion),
                ..MaskingIndicator::default()
            },
            None => MaskingIndicator::default(),
        };

        WellnessInputs {
            secondary_emotions: self.secondary.clone(),
            masking,
            repetition_detected: self.repetition,
            emotional_shift: self.shift,
            urgency_level: self.urgency,
            risk_score_from_ai: self.ai_risk,
            ..WellnessInputs::new(primary)
        }
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let response = ScoreResponse::evaluate(&RiskScorer::default(), &args.inputs());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", render_score(&response));
    }
    Ok(())
}

fn render_score(response: &ScoreResponse) -> String {
    let result = &response.result;
    let mut lines = vec![
        format!(
            "Wellness score: {:.1} ({}, {})",
            result.wellness_score,
            result.mood_seed_stage.label(),
            result.mood_color
        ),
        format!("Confidence: {:.2}", result.confidence),
        format!(
            "Needs intervention: {} | High risk: {} | Priority: {}",
            yes_no(result.needs_intervention),
            yes_no(result.high_risk),
            response.intervention_priority
        ),
        "Risk factors:".to_string(),
    ];
    lines.extend(
        result
            .risk_factors
            .iter()
            .map(|(name, value)| format!("  {name:<18} {value:.2}")),
    );
    lines.push("Suggested interventions:".to_string());
    lines.extend(
        response
            .recommended_interventions
            .iter()
            .map(|item| format!("  [{}] {}: {}", item.priority, item.title, item.description)),
    );
    lines.join("\n")
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
