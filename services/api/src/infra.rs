use axum::http::{header, HeaderValue, Method};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;
use zenguard::analysis::CompletionClient;
use zenguard::wellness::{Emotion, EmotionType, EmotionalShift};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) model: Arc<dyn CompletionClient>,
}

/// Browser access limited to the configured origins; unparsable entries are skipped.
pub(crate) fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(AllowOrigin::any());
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}

/// Strict emotion parser for command-line input; unlike model output, typos are errors.
pub(crate) fn parse_emotion(raw: &str) -> Result<EmotionType, String> {
    let normalized = raw.trim().to_ascii_lowercase();
    EmotionType::ALL
        .into_iter()
        .find(|kind| kind.label() == normalized)
        .ok_or_else(|| {
            let known: Vec<&str> = EmotionType::ALL.iter().map(|kind| kind.label()).collect();
            format!("unknown emotion '{raw}' (expected one of {})", known.join(", "))
        })
}

pub(crate) fn parse_unit(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|err| format!("failed to parse '{raw}' as a number ({err})"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("'{raw}' must be between 0 and 1"))
    }
}

pub(crate) fn parse_ai_risk(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|err| format!("failed to parse '{raw}' as a number ({err})"))?;
    if (0.0..=10.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("'{raw}' must be between 0 and 10"))
    }
}

/// Parse `label:intensity`, e.g. `sadness:0.4`.
pub(crate) fn parse_secondary(raw: &str) -> Result<Emotion, String> {
    let (label, intensity) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected LABEL:INTENSITY, got '{raw}'"))?;
    Ok(Emotion::new(parse_emotion(label)?, parse_unit(intensity)?))
}

pub(crate) fn parse_shift(raw: &str) -> Result<EmotionalShift, String> {
    EmotionalShift::from_label(raw)
        .ok_or_else(|| format!("unknown shift '{raw}' (expected improving, stable or declining)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emotions_parse_case_insensitively() {
        assert_eq!(parse_emotion(" Anxiety "), Ok(EmotionType::Anxiety));
        assert!(parse_emotion("anxious").is_err());
    }

    #[test]
    fn unit_values_are_bounded() {
        assert_eq!(parse_unit("0.35"), Ok(0.35));
        assert!(parse_unit("1.5").is_err());
        assert!(parse_unit("lots").is_err());
        assert_eq!(parse_ai_risk("7"), Ok(7.0));
        assert!(parse_ai_risk("11").is_err());
    }

    #[test]
    fn secondary_emotions_need_an_intensity() {
        assert_eq!(
            parse_secondary("sadness:0.4"),
            Ok(Emotion::new(EmotionType::Sadness, 0.4))
        );
        assert!(parse_secondary("sadness").is_err());
    }

    #[test]
    fn shifts_parse_from_labels() {
        assert_eq!(parse_shift("declining"), Ok(EmotionalShift::Declining));
        assert!(parse_shift("sideways").is_err());
    }

    #[test]
    fn cors_accepts_lists_and_wildcards() {
        let _listed = cors_layer(&[
            "http://localhost:3000".to_string(),
            "bad\norigin".to_string(),
        ]);
        let _open = cors_layer(&["*".to_string()]);
    }
}
