use clap::Args;
use serde_json::json;
use zenguard::error::AppError;
use zenguard::privacy::{PiiKind, TextObfuscator};

#[derive(Args, Debug)]
pub(crate) struct RedactArgs {
    /// Text to redact exactly as it would be before reaching the model
    #[arg(long)]
    pub(crate) text: String,
    /// Emit the report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

/// Outcome of redacting one text. Matched values are never kept, only their kinds.
#[derive(Debug, PartialEq)]
struct RedactReport {
    redacted: String,
    kinds: Vec<(PiiKind, usize)>,
    privacy_score: f64,
}

impl RedactReport {
    fn build(obfuscator: &TextObfuscator, text: &str) -> Self {
        let mut kinds: Vec<(PiiKind, usize)> = Vec::new();
        for finding in obfuscator.detect_pii(text) {
            match kinds.iter_mut().find(|(kind, _)| *kind == finding.kind) {
                Some((_, count)) => *count += 1,
                None => kinds.push((finding.kind, 1)),
            }
        }

        Self {
            redacted: obfuscator.obfuscate(text),
            kinds,
            privacy_score: obfuscator.privacy_score(text),
        }
    }

    fn pii_found(&self) -> usize {
        self.kinds.iter().map(|(_, count)| count).sum()
    }

    fn to_json(&self) -> serde_json::Value {
        let kinds: serde_json::Map<String, serde_json::Value> = self
            .kinds
            .iter()
            .map(|(kind, count)| (kind_name(*kind), json!(count)))
            .collect();
        json!({
            "redacted": self.redacted,
            "pii_found": self.pii_found(),
            "pii_kinds": kinds,
            "privacy_score": self.privacy_score,
        })
    }

    fn render(&self) -> String {
        let mut lines = vec![
            format!("Redacted: {}", self.redacted),
            format!(
                "PII found: {} | Privacy score: {:.2}",
                self.pii_found(),
                self.privacy_score
            ),
        ];
        lines.extend(
            self.kinds
                .iter()
                .map(|(kind, count)| format!("  {:<8} {count}", kind.token())),
        );
        lines.join("\n")
    }
}

fn kind_name(kind: PiiKind) -> String {
    serde_json::to_value(kind)
        .ok()
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_else(|| kind.token().to_string())
}

pub(crate) fn run_redact(args: RedactArgs) -> Result<(), AppError> {
    let report = RedactReport::build(&TextObfuscator::new(), &args.text);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.to_json())?);
    } else {
        println!("{}", report.render());
    }
    Ok(())
}
