use super::common::*;
use crate::wellness::emotion::{Emotion, EmotionType};
use crate::wellness::scoring::{
    base_risk, calculate_wellness_score, MoodSeedStage, RiskScorer, WellnessInputs,
};
use crate::wellness::signals::EmotionalShift;

#[test]
fn scores_and_confidence_stay_in_bounds() {
    let scorer = RiskScorer::default();

    for inputs in input_grid() {
        let result = scorer.calculate_wellness_score(&inputs);
        assert!(
            (0.0..=100.0).contains(&result.wellness_score),
            "score {} out of range for {inputs:?}",
            result.wellness_score
        );
        assert!(
            (0.0..=0.95).contains(&result.confidence),
            "confidence {} out of range for {inputs:?}",
            result.confidence
        );
        for (name, factor) in result.risk_factors.iter() {
            assert!((0.0..=1.0).contains(&factor), "{name} = {factor}");
        }
    }
}

#[test]
fn out_of_range_inputs_saturate() {
    let inputs = WellnessInputs {
        urgency_level: 7.5,
        risk_score_from_ai: Some(f64::NAN),
        ..WellnessInputs::new(Emotion {
            kind: EmotionType::Fear,
            intensity: -4.0,
        })
    };

    let result = RiskScorer::default().calculate_wellness_score(&inputs);

    assert_eq!(result.risk_factors.intensity, 0.0);
    assert_eq!(result.risk_factors.urgency, 1.0);
    assert!((0.0..=100.0).contains(&result.wellness_score));
}

#[test]
fn higher_intensity_never_raises_wellness() {
    let scorer = RiskScorer::default();

    for kind in EmotionType::ALL
        .into_iter()
        .filter(|kind| base_risk(*kind) > 0.0)
    {
        let mut previous = f64::INFINITY;
        for step in 0..=20 {
            let intensity = f64::from(step) / 20.0;
            let inputs = WellnessInputs {
                emotional_shift: Some(EmotionalShift::Stable),
                urgency_level: 0.2,
                risk_score_from_ai: Some(4.0),
                ..WellnessInputs::new(emotion(kind, intensity))
            };
            let score = scorer.calculate_wellness_score(&inputs).wellness_score;
            assert!(
                score <= previous,
                "{kind} at intensity {intensity} rose to {score} from {previous}"
            );
            previous = score;
        }
    }
}

#[test]
fn scoring_is_idempotent() {
    let scorer = RiskScorer::default();
    let inputs = anxiety_spiral_inputs();

    assert_eq!(
        scorer.calculate_wellness_score(&inputs),
        scorer.calculate_wellness_score(&inputs)
    );
}

#[test]
fn stages_partition_the_score_range() {
    let expectations = [
        (0.0, MoodSeedStage::Withered),
        (19.9, MoodSeedStage::Withered),
        (20.0, MoodSeedStage::Seedling),
        (39.9, MoodSeedStage::Seedling),
        (40.0, MoodSeedStage::Growing),
        (59.9, MoodSeedStage::Growing),
        (60.0, MoodSeedStage::Blooming),
        (79.9, MoodSeedStage::Blooming),
        (80.0, MoodSeedStage::Flourishing),
        (100.0, MoodSeedStage::Flourishing),
    ];
    for (score, stage) in expectations {
        assert_eq!(MoodSeedStage::from_score(score), stage, "score {score}");
    }

    let mut stages_seen = Vec::new();
    for tenth in 0..=1000 {
        let stage = MoodSeedStage::from_score(f64::from(tenth) / 10.0);
        if stages_seen.last() != Some(&stage) {
            assert!(!stages_seen.contains(&stage), "{stage:?} band is not contiguous");
            stages_seen.push(stage);
        }
    }
    assert_eq!(stages_seen.len(), 5);
}

#[test]
fn flags_follow_their_thresholds() {
    let scorer = RiskScorer::default();

    for inputs in input_grid() {
        let result = scorer.calculate_wellness_score(&inputs);
        assert_eq!(result.needs_intervention, result.wellness_score < 40.0);
        assert_eq!(result.high_risk, result.wellness_score < 25.0);
        if result.high_risk {
            assert!(result.needs_intervention);
        }
        assert_eq!(result.mood_color, result.mood_seed_stage.color());
    }
}

#[test]
fn joyful_entry_flourishes() {
    let result = RiskScorer::default().calculate_wellness_score(&joyful_inputs());

    assert_eq!(result.wellness_score, 100.0);
    assert_eq!(result.mood_seed_stage, MoodSeedStage::Flourishing);
    assert_eq!(result.mood_color, "#4ECDC4");
    assert_eq!(result.confidence, 0.83);
    assert!(!result.needs_intervention);
    assert!(!result.high_risk);
}

#[test]
fn anxiety_spiral_is_high_risk() {
    let result = RiskScorer::default().calculate_wellness_score(&anxiety_spiral_inputs());

    assert!((result.risk_factors.masking - 0.72).abs() < 1e-9);
    assert_eq!(result.wellness_score, 21.7);
    assert_eq!(result.mood_seed_stage, MoodSeedStage::Seedling);
    assert!(result.high_risk);
    assert!(result.needs_intervention);
}

#[test]
fn saturated_distress_withers() {
    let inputs = WellnessInputs {
        masking: masking(1.0),
        urgency_level: 1.0,
        risk_score_from_ai: Some(10.0),
        ..anxiety_spiral_inputs()
    };
    let inputs = WellnessInputs {
        primary_emotion: emotion(EmotionType::Anxiety, 1.0),
        ..inputs
    };

    let result = RiskScorer::default().calculate_wellness_score(&inputs);

    assert_eq!(result.wellness_score, 15.3);
    assert_eq!(result.mood_seed_stage, MoodSeedStage::Withered);
    assert!(result.high_risk);
}

#[test]
fn ai_estimate_is_blended_in() {
    let scorer = RiskScorer::default();
    let calm = WellnessInputs {
        emotional_shift: Some(EmotionalShift::Improving),
        ..WellnessInputs::new(emotion(EmotionType::Joy, 0.0))
    };
    let alarmed = WellnessInputs {
        risk_score_from_ai: Some(10.0),
        ..calm.clone()
    };

    let without = scorer.calculate_wellness_score(&calm).wellness_score;
    let with = scorer.calculate_wellness_score(&alarmed).wellness_score;

    assert_eq!(without, 100.0);
    assert_eq!(with, 60.0);
}

#[test]
fn confidence_is_capped() {
    let inputs = WellnessInputs {
        secondary_emotions: vec![emotion(EmotionType::Fear, 0.5)],
        masking: masking(1.0),
        emotional_shift: Some(EmotionalShift::Declining),
        ..WellnessInputs::new(emotion(EmotionType::Sadness, 1.0))
    };

    let result = RiskScorer::default().calculate_wellness_score(&inputs);

    assert_eq!(result.confidence, 0.95);
}

#[test]
fn emotional_tone_does_not_move_the_score() {
    let scorer = RiskScorer::default();
    let gloomy = WellnessInputs {
        emotional_tone: -1.0,
        ..anxiety_spiral_inputs()
    };
    let sunny = WellnessInputs {
        emotional_tone: 1.0,
        ..anxiety_spiral_inputs()
    };

    assert_eq!(
        scorer.calculate_wellness_score(&gloomy),
        scorer.calculate_wellness_score(&sunny)
    );
}

#[test]
fn free_function_uses_standard_rubric() {
    let inputs = anxiety_spiral_inputs();
    let result = calculate_wellness_score(
        inputs.primary_emotion,
        &inputs.secondary_emotions,
        inputs.emotional_tone,
        &inputs.masking,
        inputs.repetition_detected,
        inputs.emotional_shift,
        inputs.urgency_level,
        inputs.risk_score_from_ai,
    );

    assert_eq!(result, RiskScorer::default().calculate_wellness_score(&inputs));
}
