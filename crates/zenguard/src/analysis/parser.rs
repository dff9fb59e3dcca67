//! Tolerant extraction of JSON payloads from reasoning-model output.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::wellness::emotion::saturate;

static RE_THINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("valid regex"));
static RE_OBJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\{[^{}]*(?:\{[^{}]*\}[^{}]*)*\}").expect("valid regex")
});

/// Drop `<think>` sections and surrounding markdown fences.
pub fn strip_reasoning(response: &str) -> String {
    let cleaned = RE_THINK.replace_all(response, "");
    let mut cleaned = cleaned.trim();

    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }
    cleaned.trim().to_string()
}

/// Best-effort JSON object from model output; empty when nothing parses.
pub fn parse_reasoning_response(response: &str) -> Map<String, Value> {
    let cleaned = strip_reasoning(response);

    if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(&cleaned) {
        return object;
    }

    RE_OBJECT
        .find(&cleaned)
        .and_then(|found| serde_json::from_str::<Value>(found.as_str()).ok())
        .and_then(|value| match value {
            Value::Object(object) => Some(object),
            _ => None,
        })
        .unwrap_or_default()
}

/// Read a numeric field, clamped into `[min, max]`.
///
/// Missing fields take `default`; present but non-numeric values take the midpoint.
pub fn read_clamped(fields: &Map<String, Value>, key: &str, default: f64, min: f64, max: f64) -> f64 {
    let raw = match fields.get(key) {
        None | Some(Value::Null) => default,
        Some(value) => number_from_value(value),
    };
    saturate(raw, min, max)
}

/// Numeric reading of any JSON value: numbers, numeric strings and booleans.
///
/// Anything else is NaN, which [`saturate`] resolves to the range midpoint.
pub fn number_from_value(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => text.trim().parse::<f64>().unwrap_or(f64::NAN),
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        _ => f64::NAN,
    }
}

pub fn read_string(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

pub fn read_string_list(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    fields
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

pub fn read_bool(fields: &Map<String, Value>, key: &str) -> bool {
    match fields.get(key) {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => text.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}
