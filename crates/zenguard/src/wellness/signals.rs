//! Stateless text analyzers that derive secondary indicators for scoring.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Minimum occurrences of a significant word before it counts as rumination.
pub const WORD_REPETITION_THRESHOLD: usize = 3;
/// Minimum occurrences of a two-word phrase before it counts as rumination.
pub const PHRASE_REPETITION_THRESHOLD: usize = 2;
/// Texts shorter than this (in words) carry too little signal for shift detection.
pub const SHIFT_MIN_WORDS: usize = 20;

const MAX_REPORTED_REPETITIONS: usize = 5;
const SHIFT_DELTA: f64 = 0.3;

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should", "may", "might", "must", "it", "its", "this", "that", "these",
    "those", "i", "me", "my", "myself", "we", "our", "you", "your", "he", "she", "they", "them",
    "what", "which", "who", "when", "where", "why", "how", "all", "each", "every", "both", "few",
    "more", "most", "other", "some", "such", "no", "not", "only", "own", "same", "so", "than",
    "too", "very", "just", "can", "im", "i'm", "dont", "don't", "cant", "can't",
];

const POSITIVE_WORDS: &[&str] = &[
    "happy", "good", "great", "better", "best", "love", "wonderful", "amazing", "excited",
    "hopeful", "grateful", "thankful", "joy", "blessed", "peaceful", "calm", "relaxed",
    "confident", "proud",
];

const NEGATIVE_WORDS: &[&str] = &[
    "sad", "bad", "worse", "worst", "hate", "terrible", "awful", "anxious", "worried", "scared",
    "angry", "frustrated", "alone", "lonely", "tired", "exhausted", "stressed", "overwhelmed",
    "hopeless",
];

// The typing-time check uses a slightly narrower lexicon than shift detection.
const QUICK_POSITIVE_WORDS: &[&str] = &[
    "happy", "good", "great", "better", "love", "wonderful", "amazing", "excited", "hopeful",
    "grateful", "thankful", "peaceful", "calm", "relaxed", "confident",
];

const QUICK_NEGATIVE_WORDS: &[&str] = &[
    "sad", "bad", "worse", "hate", "terrible", "awful", "anxious", "worried", "scared", "angry",
    "frustrated", "lonely", "tired", "exhausted", "stressed", "overwhelmed",
];

const QUICK_SUGGESTION: &str = "Take a deep breath. It's okay to feel this way.";

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Outcome of the rumination scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepetitionReport {
    pub detected: bool,
    /// Up to five repeated words or phrases, words first, in order of first appearance.
    pub repeated: Vec<String>,
}

/// Coarse direction of emotional polarity from the first to the second half of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalShift {
    Improving,
    Stable,
    Declining,
}

impl EmotionalShift {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "improving" => Some(Self::Improving),
            "stable" => Some(Self::Stable),
            "declining" => Some(Self::Declining),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Stable => "stable",
            Self::Declining => "declining",
        }
    }
}

/// Counter that remembers first-seen order, so reports are stable across runs.
#[derive(Default)]
struct OrderedCounts {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl OrderedCounts {
    fn bump(&mut self, key: String) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    fn at_least(self, threshold: usize) -> impl Iterator<Item = String> {
        self.entries
            .into_iter()
            .filter(move |(_, count)| *count >= threshold)
            .map(|(key, _)| key)
    }
}

/// Detect repeated significant words and two-word phrases.
pub fn analyze_repetition(text: &str) -> RepetitionReport {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();

    let mut word_counts = OrderedCounts::default();
    for word in &words {
        let cleaned: String = word.chars().filter(|c| c.is_alphanumeric()).collect();
        if cleaned.chars().count() > 2 && !is_stop_word(&cleaned) {
            word_counts.bump(cleaned);
        }
    }
    let mut repeated: Vec<String> = word_counts.at_least(WORD_REPETITION_THRESHOLD).collect();

    if words.len() >= 2 {
        let mut bigram_counts = OrderedCounts::default();
        for pair in words.windows(2) {
            bigram_counts.bump(format!("{} {}", pair[0], pair[1]));
        }
        repeated.extend(
            bigram_counts
                .at_least(PHRASE_REPETITION_THRESHOLD)
                .filter(|phrase| !phrase.split(' ').all(is_stop_word)),
        );
    }

    let detected = !repeated.is_empty();
    repeated.truncate(MAX_REPORTED_REPETITIONS);
    RepetitionReport { detected, repeated }
}

fn polarity(words: &[&str], positive: &[&str], negative: &[&str]) -> f64 {
    let mut pos = 0usize;
    let mut neg = 0usize;
    for word in words {
        let lowered = word.to_lowercase();
        if positive.contains(&lowered.as_str()) {
            pos += 1;
        } else if negative.contains(&lowered.as_str()) {
            neg += 1;
        }
    }

    if pos + neg == 0 {
        0.0
    } else {
        (pos as f64 - neg as f64) / (pos + neg) as f64
    }
}

/// Compare polarity between the two halves of a text.
///
/// Returns `None` when the text has fewer than [`SHIFT_MIN_WORDS`] words.
pub fn detect_emotional_shift(text: &str) -> Option<EmotionalShift> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < SHIFT_MIN_WORDS {
        return None;
    }

    let (first, second) = words.split_at(words.len() / 2);
    let diff = polarity(second, POSITIVE_WORDS, NEGATIVE_WORDS)
        - polarity(first, POSITIVE_WORDS, NEGATIVE_WORDS);

    let shift = if diff > SHIFT_DELTA {
        EmotionalShift::Improving
    } else if diff < -SHIFT_DELTA {
        EmotionalShift::Declining
    } else {
        EmotionalShift::Stable
    };
    Some(shift)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickTone {
    Positive,
    Neutral,
    Concerning,
}

/// Lightweight feedback computed while the user is still typing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickCheck {
    pub emotional_tone: QuickTone,
    pub intensity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl QuickCheck {
    pub fn neutral() -> Self {
        Self {
            emotional_tone: QuickTone::Neutral,
            intensity: 0.3,
            suggestion: None,
        }
    }
}

pub fn quick_check(text: &str) -> QuickCheck {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let pos = words
        .iter()
        .filter(|word| QUICK_POSITIVE_WORDS.contains(*word))
        .count();
    let neg = words
        .iter()
        .filter(|word| QUICK_NEGATIVE_WORDS.contains(*word))
        .count();

    if pos + neg == 0 {
        return QuickCheck::neutral();
    }

    let density = |hits: usize| (hits as f64 / words.len().max(1) as f64 * 5.0).min(1.0);
    let (emotional_tone, intensity) = if pos > neg {
        (QuickTone::Positive, density(pos))
    } else {
        (QuickTone::Concerning, density(neg))
    };

    let suggestion = (emotional_tone == QuickTone::Concerning && intensity > 0.5)
        .then(|| QUICK_SUGGESTION.to_string());

    QuickCheck {
        emotional_tone,
        intensity,
        suggestion,
    }
}
