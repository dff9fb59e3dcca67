//! Language model collaborator: completion transport and emotion extraction.

mod client;
pub mod parser;
mod sentiment;

pub use client::{CompletionClient, CompletionRequest, OllamaClient, OllamaSettings};
pub use sentiment::{
    EnergyLevel, SentimentAnalyzer, SentimentReading, VisualMoodReading, MASKING_PROMPT_CHARS,
};

/// Failures talking to the language model.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("language model request timed out")]
    Timeout,
    #[error("language model returned HTTP {0}")]
    Status(u16),
    #[error("language model response could not be decoded: {0}")]
    Decode(String),
    #[error("language model unreachable: {0}")]
    Transport(String),
}
