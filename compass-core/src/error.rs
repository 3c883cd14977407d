//! Error types for compass-core

use thiserror::Error;

/// Errors related to the assessment session state machine
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid state: expected {expected}, got {actual}")]
    InvalidState { expected: String, actual: String },

    #[error("Question {index} has no answer yet")]
    Unanswered { index: usize },
}

/// Errors from recommendation providers
///
/// These never reach the UI directly: [`crate::RecommendationClient`]
/// converts every variant into the fallback recommendation card.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("No API key configured. Set GEMINI_API_KEY in the environment.")]
    MissingApiKey,

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}
