//! Forgiving deserializers for caller-supplied scoring signals.
//!
//! Labels fold onto the closed sets and numbers saturate into range, so a
//! sloppy payload is scored instead of rejected.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::emotion::{saturate, EmotionType};
use super::signals::EmotionalShift;
use crate::analysis::parser::number_from_value;

fn number_in<'de, D>(deserializer: D, min: f64, max: f64) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(saturate(number_from_value(&value), min, max))
}

/// Any value read as a number in `[0, 1]`.
pub(crate) fn unit<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    number_in(deserializer, 0.0, 1.0)
}

/// Any value read as a tone in `[-1, 1]`.
pub(crate) fn tone<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    number_in(deserializer, -1.0, 1.0)
}

/// Optional 0-10 model estimate; `null` means no estimate.
pub(crate) fn ai_risk<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(saturate(number_from_value(&other), 0.0, 10.0)),
    })
}

/// Unrecognized shift labels carry no evidence and read as absent.
pub(crate) fn shift<'de, D>(deserializer: D) -> Result<Option<EmotionalShift>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(EmotionalShift::from_label))
}

pub(crate) fn emotion_type<'de, D>(deserializer: D) -> Result<EmotionType, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(EmotionType::from_label(value.as_str().unwrap_or_default()))
}
