use serde::{Deserialize, Serialize};

/// Plant-growth metaphor used to visualise the wellness tier to end users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodSeedStage {
    Withered,
    Seedling,
    Growing,
    Blooming,
    Flourishing,
}

impl MoodSeedStage {
    /// Inclusive lower bounds: 80, 60, 40, 20, everything else withered.
    pub fn from_score(wellness_score: f64) -> Self {
        if wellness_score >= 80.0 {
            Self::Flourishing
        } else if wellness_score >= 60.0 {
            Self::Blooming
        } else if wellness_score >= 40.0 {
            Self::Growing
        } else if wellness_score >= 20.0 {
            Self::Seedling
        } else {
            Self::Withered
        }
    }

    /// Calm palette; the lowest tier gets a gentle rose rather than red.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Flourishing => "#4ECDC4",
            Self::Blooming => "#7EC8A3",
            Self::Growing => "#F7DC6F",
            Self::Seedling => "#E8B87C",
            Self::Withered => "#E87C8A",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Withered => "withered",
            Self::Seedling => "seedling",
            Self::Growing => "growing",
            Self::Blooming => "blooming",
            Self::Flourishing => "flourishing",
        }
    }
}

/// Urgency ladder for follow-up, 1 being the most urgent.
pub fn intervention_priority(wellness_score: f64) -> u8 {
    if wellness_score < 20.0 {
        1
    } else if wellness_score < 35.0 {
        2
    } else if wellness_score < 50.0 {
        3
    } else if wellness_score < 65.0 {
        4
    } else {
        5
    }
}
