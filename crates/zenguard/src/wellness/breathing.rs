use serde::{Deserialize, Serialize};

const DEFAULT_DURATION_SECONDS: u32 = 120;

/// Situations the breathing catalog is organised around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BreathingCategory {
    CalmReset,
    AnxietyRelief,
    FocusStudy,
    EnergyLifting,
    Mindfulness,
}

impl BreathingCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CalmReset => "Calm & Nervous System Reset",
            Self::AnxietyRelief => "Anxiety Relief & Emotional Processing",
            Self::FocusStudy => "Focus & Study Preparation",
            Self::EnergyLifting => "Energy & Mood Lifting",
            Self::Mindfulness => "Mindfulness & Meditation Style",
        }
    }

    /// Short tag stored on each exercise record.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::CalmReset => "Calm",
            Self::AnxietyRelief => "Anxiety",
            Self::FocusStudy => "Focus",
            Self::EnergyLifting => "Energy",
            Self::Mindfulness => "Mindfulness",
        }
    }

    pub fn exercises(&self) -> &'static [BreathingTemplate] {
        match self {
            Self::CalmReset => CALM_RESET,
            Self::AnxietyRelief => ANXIETY_RELIEF,
            Self::FocusStudy => FOCUS_STUDY,
            Self::EnergyLifting => ENERGY_LIFTING,
            Self::Mindfulness => MINDFULNESS,
        }
    }
}

/// Static catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreathingTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub pattern: Option<&'static str>,
    pub duration_seconds: u32,
}

const fn exercise(
    name: &'static str,
    description: &'static str,
    pattern: Option<&'static str>,
) -> BreathingTemplate {
    BreathingTemplate {
        name,
        description,
        pattern,
        duration_seconds: DEFAULT_DURATION_SECONDS,
    }
}

const fn timed(name: &'static str, description: &'static str, seconds: u32) -> BreathingTemplate {
    BreathingTemplate {
        name,
        description,
        pattern: None,
        duration_seconds: seconds,
    }
}

/// Owned exercise record handed back to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathingExercise {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    pub duration_seconds: u32,
    pub category: String,
}

impl BreathingExercise {
    pub fn from_template(template: &BreathingTemplate, category: BreathingCategory) -> Self {
        Self {
            name: template.name.to_string(),
            description: template.description.to_string(),
            pattern: template.pattern.map(str::to_string),
            duration_seconds: template.duration_seconds,
            category: category.tag().to_string(),
        }
    }
}

/// Exercise chosen for a submission together with the situation that matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathingRecommendation {
    #[serde(flatten)]
    pub exercise: BreathingExercise,
    pub situation_category: String,
}

const CALM_RESET: &[BreathingTemplate] = &[
    exercise("4-4 Breathing", "Inhale 4 sec, exhale 4 sec", Some("4-4")),
    exercise(
        "4-6 Breathing",
        "Inhale 4, exhale 6 (excellent for anxiety)",
        Some("4-6"),
    ),
    exercise("4-7-8 Breathing", "Inhale 4, hold 7, exhale 8", Some("4-7-8")),
    exercise("Extended Exhale Breathing", "Inhale 3, exhale 8", Some("3-8")),
    exercise("Physiological Sigh", "2 inhales + 1 long exhale", None),
    exercise("Box Breathing", "4-4-4-4 (Navy SEAL method)", Some("4-4-4-4")),
    exercise("Triangle Breathing", "Inhale 4, hold 4, exhale 4", Some("4-4-4")),
    exercise("5-5 Coherent Breathing", "Inhale 5, exhale 5", Some("5-5")),
    exercise("6-6 Heart Rate Breathing", "Inhale 6, exhale 6", Some("6-6")),
    timed(
        "Soft Nose Breathing",
        "Slow, quiet nasal breathing for 5 minutes",
        300,
    ),
];

const ANXIETY_RELIEF: &[BreathingTemplate] = &[
    exercise(
        "Hand-on-heart breathing",
        "Breathe while keeping a hand on your heart",
        None,
    ),
    exercise(
        "Self-hug breathing",
        "Arms crossed on chest while breathing",
        None,
    ),
    exercise(
        "Crying release breathing",
        "Inhale nose, sigh through mouth",
        None,
    ),
    exercise(
        "Name-the-emotion breathing",
        "Say emotion mentally on exhale",
        None,
    ),
    exercise(
        "Grounding breath",
        "Inhale 'I am here', exhale 'I am safe'",
        None,
    ),
    exercise("Counting backward breathing", "10 to 1 each breath", None),
    exercise(
        "Butterfly breathing",
        "Lightly tap shoulders while breathing",
        None,
    ),
    exercise(
        "Forgiveness breathing",
        "Inhale acceptance, exhale tension",
        None,
    ),
    exercise(
        "Gratitude breathing",
        "Think one good thing each exhale",
        None,
    ),
    exercise("Shoulder-drop breathing", "Drop shoulders every exhale", None),
];

const FOCUS_STUDY: &[BreathingTemplate] = &[
    exercise("1:2 Breathing Ratio", "Inhale 4, exhale 8", Some("4-8")),
    timed(
        "Nasal-only breathing",
        "Nasal-only breathing for 5 minutes",
        300,
    ),
    exercise(
        "3-3-3 Focus breathing",
        "Inhale 3, hold 3, exhale 3",
        Some("3-3-3"),
    ),
    exercise("Equal breathing (Sama Vritti)", "Equal inhale & exhale", None),
    exercise(
        "Pencil-tip focus breathing",
        "Stare at one point while breathing",
        None,
    ),
    exercise(
        "Pre-study alert breathing",
        "20 slightly faster nasal breaths",
        None,
    ),
    exercise("Spine-straight breathing", "Sit upright and breathe deep", None),
    exercise(
        "Silent breath counting to 20",
        "Count your breaths up to 20",
        None,
    ),
    exercise(
        "Eye-closed deep diaphragmatic breathing",
        "Deep breaths with eyes closed",
        None,
    ),
    exercise(
        "5 slow breaths",
        "5 slow breaths before opening your book",
        None,
    ),
];

const ENERGY_LIFTING: &[BreathingTemplate] = &[
    exercise("Bellows breathing", "Fast inhale/exhale nose", None),
    exercise(
        "Power inhale + strong mouth exhale",
        "Deep inhale, forceful exhale",
        None,
    ),
    exercise("Sun breath", "Raise arms inhale, drop arms exhale", None),
    exercise("Standing deep breathing", "Stand tall and breathe deep", None),
    exercise("Marching breathing", "Walk in place while breathing", None),
    exercise(
        "3 quick inhales + 1 long exhale",
        "Quick inhales followed by long exhale",
        None,
    ),
    exercise("Cold air inhale", "Breathe near window for fresh air", None),
    exercise("Smile breathing", "Slight smile while breathing", None),
    exercise(
        "Morning wake-up breathing",
        "10 deep chest expansions",
        None,
    ),
    exercise("Lion's breath", "Inhale nose, exhale mouth tongue out", None),
];

const MINDFULNESS: &[BreathingTemplate] = &[
    exercise("Body-scan breathing", "Move attention from toes to head", None),
    exercise("Observe-only breathing", "Don't control, just watch", None),
    exercise("Mantra breathing", "Inhale 'So', exhale 'Hum'", None),
    exercise("Ocean wave breathing", "Imagine waves with breaths", None),
    exercise("Cloud breathing", "Thoughts pass like clouds", None),
    exercise("Candle-flame breathing", "Imagine steady flame", None),
    exercise("Heartbeat breathing", "Match breath to pulse", None),
    exercise("5-senses breathing", "Notice senses each inhale", None),
    exercise("Let-go breathing", "Imagine tension leaving body", None),
    timed(
        "2-minute silent stillness breathing",
        "2 minutes of complete stillness",
        120,
    ),
];
