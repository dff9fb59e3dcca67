//! Server-side PII redaction applied before any text reaches the language model.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Category of personally identifying text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PiiKind {
    Email,
    Phone,
    Ssn,
    Date,
    Card,
    Url,
    StudentId,
}

impl PiiKind {
    pub fn token(&self) -> &'static str {
        match self {
            Self::Email => "[EMAIL]",
            Self::Phone => "[PHONE]",
            Self::Ssn => "[SSN]",
            Self::Date => "[DATE]",
            Self::Card => "[CARD]",
            Self::Url => "[URL]",
            Self::StudentId => "[ID]",
        }
    }
}

struct PiiPattern {
    kind: PiiKind,
    regex: Regex,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

// Applied in order; earlier patterns consume digits later ones would also match.
static PII_PATTERNS: Lazy<Vec<PiiPattern>> = Lazy::new(|| {
    [
        (
            PiiKind::Email,
            r"(?i)\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
        ),
        (
            PiiKind::Phone,
            r"\b(?:\+\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b",
        ),
        (PiiKind::Ssn, r"\b\d{3}[-\s]?\d{2}[-\s]?\d{4}\b"),
        (
            PiiKind::Date,
            r"\b(?:\d{1,2}[-/]\d{1,2}[-/]\d{2,4}|\d{4}[-/]\d{1,2}[-/]\d{1,2})\b",
        ),
        (PiiKind::Card, r"\b(?:\d{4}[-\s]?){4}\b"),
        (PiiKind::Url, r"(?i)https?://\S+"),
        (PiiKind::StudentId, r"(?i)\b[A-Z]{2,3}\d{6,8}\b"),
    ]
    .into_iter()
    .map(|(kind, pattern)| PiiPattern {
        kind,
        regex: compile(pattern),
    })
    .collect()
});

static INSTITUTION_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (
            compile(r"\b[A-Z][a-z]+ (?:University|College|School|Academy|Institute)\b"),
            "[SCHOOL]",
        ),
        (
            compile(r"\b[A-Z][a-z]+ (?:Hospital|Clinic|Medical Center)\b"),
            "[HOSPITAL]",
        ),
        (compile(r"\b[A-Z][a-z]+ (?:High|Middle|Elementary)\b"), "[SCHOOL]"),
    ]
});

static RE_LOOSE_NUMBER: Lazy<Regex> = Lazy::new(|| compile(r"\b\d{3,5}\b"));

/// A PII match found in unmodified text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PiiFinding {
    pub kind: PiiKind,
    pub matched: String,
}

/// Replaces identifying details with placeholder tokens while leaving the
/// emotional content intact.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextObfuscator;

impl TextObfuscator {
    pub fn new() -> Self {
        Self
    }

    pub fn obfuscate(&self, text: &str) -> String {
        let mut result = text.to_string();

        for pattern in PII_PATTERNS.iter() {
            result = pattern
                .regex
                .replace_all(&result, pattern.kind.token())
                .into_owned();
        }
        for (regex, token) in INSTITUTION_PATTERNS.iter() {
            result = regex.replace_all(&result, *token).into_owned();
        }

        // Street and room numbers.
        RE_LOOSE_NUMBER.replace_all(&result, "[NUM]").into_owned()
    }

    /// Report PII without modifying the text; institutions and loose numbers are not reported.
    pub fn detect_pii(&self, text: &str) -> Vec<PiiFinding> {
        PII_PATTERNS
            .iter()
            .flat_map(|pattern| {
                pattern.regex.find_iter(text).map(|found| PiiFinding {
                    kind: pattern.kind,
                    matched: found.as_str().to_string(),
                })
            })
            .collect()
    }

    /// PII density in `[0, 1]`; higher means more identifying content.
    pub fn privacy_score(&self, text: &str) -> f64 {
        let findings = self.detect_pii(text).len();
        let words = text.split_whitespace().count();
        if findings == 0 || words == 0 {
            return 0.0;
        }

        (findings as f64 / words as f64 * 10.0).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_details_are_replaced() {
        let redacted = TextObfuscator::new()
            .obfuscate("Email me at sam.lee@example.com or call 555-123-4567.");
        assert_eq!(redacted, "Email me at [EMAIL] or call [PHONE].");
    }

    #[test]
    fn institutions_and_numbers_are_generalized() {
        let redacted =
            TextObfuscator::new().obfuscate("I live at 1234 Maple and study at Lincoln University");
        assert_eq!(redacted, "I live at [NUM] Maple and study at [SCHOOL]");
    }

    #[test]
    fn urls_and_dates_are_replaced() {
        let redacted =
            TextObfuscator::new().obfuscate("see https://example.com/me before 10/12/2024");
        assert_eq!(redacted, "see [URL] before [DATE]");
    }

    #[test]
    fn emotional_content_is_untouched() {
        let text = "I feel so tired of pretending everything is fine";
        assert_eq!(TextObfuscator::new().obfuscate(text), text);
    }

    #[test]
    fn detection_reports_kind_and_match() {
        let findings = TextObfuscator::new().detect_pii("reach me at sam@example.com");
        assert_eq!(
            findings,
            vec![PiiFinding {
                kind: PiiKind::Email,
                matched: "sam@example.com".to_string(),
            }]
        );
    }

    #[test]
    fn privacy_score_tracks_density() {
        let obfuscator = TextObfuscator::new();
        assert_eq!(obfuscator.privacy_score("nothing to see here"), 0.0);
        assert_eq!(obfuscator.privacy_score("sam@example.com"), 1.0);

        let sparse = "one two three four five six seven eight nine ten eleven twelve \
                      thirteen fourteen fifteen sixteen seventeen eighteen nineteen sam@example.com";
        assert!((obfuscator.privacy_score(sparse) - 0.5).abs() < 1e-9);
    }
}
