use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::breathing::{BreathingCategory, BreathingExercise, BreathingRecommendation};
use super::emotion::{Emotion, EmotionType};

/// Wellness below this forces grounding to the front and tightens priorities.
pub const CRISIS_WELLNESS_THRESHOLD: f64 = 30.0;
/// Intensity above this counts as high intensity even when the caller says otherwise.
pub const HIGH_INTENSITY_THRESHOLD: f64 = 0.7;
pub const MAX_INTERVENTIONS: usize = 3;

const MIN_AI_MESSAGE_CHARS: usize = 10;
const MASKING_SUFFIX: &str =
    " Remember, it's okay to not be okay. You don't have to hide how you truly feel.";
const FALLBACK_MESSAGES: &[&str] = &["Thank you for sharing. Your feelings matter."];
const FOCUS_KEYWORDS: &[&str] = &[
    "study", "exam", "test", "focus", "work", "deadline", "prepare", "reading",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionType {
    Breathing,
    Grounding,
    MemoryBox,
    Affirmation,
    Music,
    Journaling,
}

/// Recommended self-care activity; priority 1 is the most urgent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intervention {
    #[serde(rename = "type")]
    pub kind: InterventionType,
    pub title: String,
    pub description: String,
    pub priority: u8,
}

/// Fixed catalog entry that interventions are instantiated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterventionTemplate {
    pub kind: InterventionType,
    pub title: &'static str,
    pub description: &'static str,
    pub priority: u8,
}

impl Intervention {
    /// Build a fresh intervention, moving its priority `urgency` steps toward 1.
    pub fn from_template(template: &InterventionTemplate, urgency: u8) -> Self {
        let priority = template.priority.saturating_sub(urgency).clamp(1, 5);
        Self {
            kind: template.kind,
            title: template.title.to_string(),
            description: template.description.to_string(),
            priority,
        }
    }
}

impl InterventionType {
    pub fn template(&self) -> &'static InterventionTemplate {
        match self {
            Self::Breathing => &BREATHING,
            Self::Grounding => &GROUNDING,
            Self::MemoryBox => &MEMORY_BOX,
            Self::Affirmation => &AFFIRMATION,
            Self::Journaling => &JOURNALING,
            Self::Music => &MUSIC,
        }
    }
}

const BREATHING: InterventionTemplate = InterventionTemplate {
    kind: InterventionType::Breathing,
    title: "4-7-8 Breathing",
    description: "A calming breathing technique: breathe in for 4 seconds, hold for 7, exhale for 8. Let's do it together.",
    priority: 1,
};

const GROUNDING: InterventionTemplate = InterventionTemplate {
    kind: InterventionType::Grounding,
    title: "5-4-3-2-1 Grounding",
    description: "Ground yourself in the present moment by noticing 5 things you see, 4 you can touch, 3 you hear, 2 you smell, and 1 you taste.",
    priority: 2,
};

const MEMORY_BOX: InterventionTemplate = InterventionTemplate {
    kind: InterventionType::MemoryBox,
    title: "Memory Box",
    description: "Take a moment to recall a happy memory. Picture it vividly - where were you? Who was there? How did it feel?",
    priority: 3,
};

const AFFIRMATION: InterventionTemplate = InterventionTemplate {
    kind: InterventionType::Affirmation,
    title: "Gentle Reminder",
    description: "You are doing your best, and that is enough. This feeling is temporary, and you have overcome difficult times before.",
    priority: 4,
};

const JOURNALING: InterventionTemplate = InterventionTemplate {
    kind: InterventionType::Journaling,
    title: "Continued Reflection",
    description: "Would you like to explore these feelings further? Sometimes writing more can help clarify our thoughts.",
    priority: 5,
};

const MUSIC: InterventionTemplate = InterventionTemplate {
    kind: InterventionType::Music,
    title: "Calming Sounds",
    description: "Take a moment to listen to some soothing sounds. Let the music wash over you.",
    priority: 4,
};

fn suggested_for(kind: EmotionType) -> &'static [InterventionType] {
    use InterventionType::*;
    match kind {
        EmotionType::Anxiety => &[Breathing, Grounding, Music],
        EmotionType::Fear => &[Grounding, Breathing, Affirmation],
        EmotionType::Sadness => &[MemoryBox, Affirmation, Music],
        EmotionType::Anger => &[Breathing, Grounding, Journaling],
        EmotionType::Disgust => &[Breathing, Affirmation],
        EmotionType::Neutral => &[Journaling, Affirmation],
        EmotionType::Joy => &[MemoryBox],
        EmotionType::Hope => &[Journaling],
        EmotionType::Surprise => &[Breathing],
    }
}

fn message_pool(kind: EmotionType) -> &'static [&'static str] {
    match kind {
        EmotionType::Anxiety => &[
            "It's okay to feel anxious. Your body is trying to protect you. Let's help it calm down together.",
            "Anxiety can feel overwhelming, but you're not alone in this. Take one breath at a time.",
            "Your worries are valid, and it's brave of you to acknowledge them. Let's work through this gently.",
        ],
        EmotionType::Fear => &[
            "Fear is a natural response. You're safe right now, in this moment.",
            "It takes courage to face our fears, even just by acknowledging them. You're doing great.",
            "Whatever you're afraid of, remember: you've survived difficult things before.",
        ],
        EmotionType::Sadness => &[
            "It's okay to feel sad. Your emotions are valid, and it's healthy to acknowledge them.",
            "Sadness can feel heavy, but it won't last forever. Be gentle with yourself.",
            "Thank you for sharing what you're going through. You don't have to carry this alone.",
        ],
        EmotionType::Anger => &[
            "Anger often tells us something important about our boundaries. It's okay to feel this way.",
            "Your frustration is understandable. Let's find a healthy way to release some of this energy.",
            "It's brave to acknowledge anger instead of pushing it down. Let's work through it together.",
        ],
        EmotionType::Neutral => &[
            "Thank you for taking time to reflect. Every moment of self-awareness matters.",
            "Even quiet moments of journaling help us understand ourselves better.",
            "You're doing something valuable by checking in with yourself.",
        ],
        EmotionType::Joy => &[
            "It's wonderful to hear positive feelings! Savoring happy moments helps build resilience.",
            "Your joy is beautiful. Take a moment to really feel it.",
            "Celebrating good moments, even small ones, is so important. Well done!",
        ],
        EmotionType::Hope => &[
            "Hope is a powerful feeling. Hold onto it - it will guide you through difficult times.",
            "Your optimism is a strength. It takes courage to look forward with hope.",
            "Hope lights the way forward. You're on the right path.",
        ],
        EmotionType::Surprise | EmotionType::Disgust => FALLBACK_MESSAGES,
    }
}

/// Pick the breathing situation for a submission; first matching rule wins.
pub fn breathing_category(text: &str, primary: &Emotion, risk_score: f64) -> BreathingCategory {
    let lowered = text.to_lowercase();
    if FOCUS_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(*keyword))
    {
        return BreathingCategory::FocusStudy;
    }

    if matches!(
        primary.kind,
        EmotionType::Anxiety | EmotionType::Fear | EmotionType::Anger | EmotionType::Sadness
    ) || risk_score > 7.0
    {
        return BreathingCategory::AnxietyRelief;
    }

    if primary.intensity > 0.8 && matches!(primary.kind, EmotionType::Sadness | EmotionType::Neutral)
    {
        return BreathingCategory::EnergyLifting;
    }

    if primary.kind == EmotionType::Joy || primary.intensity < 0.4 {
        return BreathingCategory::Mindfulness;
    }

    BreathingCategory::CalmReset
}

/// Stateless selector over the fixed intervention and message catalogs.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterventionSelector;

impl InterventionSelector {
    pub fn new() -> Self {
        Self
    }

    /// Ranked, de-duplicated list of at most three interventions.
    pub fn interventions(
        &self,
        primary: &Emotion,
        wellness_score: f64,
        masking_detected: bool,
        high_intensity: bool,
    ) -> Vec<Intervention> {
        let mut suggested: Vec<InterventionType> = suggested_for(primary.kind).to_vec();
        let crisis = wellness_score < CRISIS_WELLNESS_THRESHOLD;

        let mut prepend = |kind: InterventionType| {
            if !suggested.contains(&kind) {
                suggested.insert(0, kind);
            }
        };

        if masking_detected {
            prepend(InterventionType::Affirmation);
        }
        if high_intensity || primary.intensity > HIGH_INTENSITY_THRESHOLD {
            prepend(InterventionType::Breathing);
        }
        if crisis {
            prepend(InterventionType::Grounding);
        }

        let urgency = u8::from(crisis);
        suggested
            .into_iter()
            .take(MAX_INTERVENTIONS)
            .map(|kind| Intervention::from_template(kind.template(), urgency))
            .collect()
    }

    /// Prefer a substantive model-written message; otherwise draw from the emotion's pool.
    pub fn supportive_message<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        primary: &Emotion,
        masking_detected: bool,
        ai_message: Option<&str>,
    ) -> String {
        let mut message = match ai_message {
            Some(text) if text.chars().count() > MIN_AI_MESSAGE_CHARS => text.to_string(),
            _ => message_pool(primary.kind)
                .choose(rng)
                .or_else(|| FALLBACK_MESSAGES.first())
                .map(|message| message.to_string())
                .unwrap_or_default(),
        };

        if masking_detected {
            message.push_str(MASKING_SUFFIX);
        }
        message
    }

    pub fn breathing_exercise<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        text: &str,
        primary: &Emotion,
        risk_score: f64,
    ) -> Option<BreathingRecommendation> {
        let category = breathing_category(text, primary, risk_score);
        let template = category.exercises().choose(rng)?;

        Some(BreathingRecommendation {
            exercise: BreathingExercise::from_template(template, category),
            situation_category: category.label().to_string(),
        })
    }
}
