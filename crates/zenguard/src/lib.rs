//! Privacy-first wellness analysis for journaling and chat.
//!
//! Text is redacted, read by a local language model, scored by a
//! deterministic rubric and paired with coping interventions. Nothing is
//! stored between requests.

pub mod analysis;
pub mod config;
pub mod error;
pub mod privacy;
pub mod telemetry;
pub mod wellness;
