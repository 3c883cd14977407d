//! Mock recommendation backend for testing
//!
//! MockRecommendationBackend allows scripting provider outcomes for unit
//! tests, enabling fast, deterministic testing of client and session logic.

use std::collections::VecDeque;

use async_trait::async_trait;

use super::traits::{Recommendation, RecommendationBackend};
use crate::error::ProviderError;

/// Mock implementation of RecommendationBackend for testing
///
/// Queue outcomes with `queue_recommendations()` or `queue_error()` before
/// calling `generate()`. Each `generate()` consumes one queued outcome.
pub struct MockRecommendationBackend {
    /// Queued outcomes (each generate() consumes one)
    outcomes: VecDeque<Result<Vec<Recommendation>, ProviderError>>,
    /// Prompts received, for assertions
    prompts: Vec<String>,
}

impl MockRecommendationBackend {
    pub fn new() -> Self {
        Self {
            outcomes: VecDeque::new(),
            prompts: Vec::new(),
        }
    }

    /// Queue a successful response for the next generate()
    pub fn queue_recommendations(&mut self, recommendations: Vec<Recommendation>) {
        self.outcomes.push_back(Ok(recommendations));
    }

    /// Queue an error for the next generate()
    pub fn queue_error(&mut self, error: ProviderError) {
        self.outcomes.push_back(Err(error));
    }

    /// Prompts received so far
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Get the number of queued outcomes
    pub fn queued_outcome_count(&self) -> usize {
        self.outcomes.len()
    }
}

impl Default for MockRecommendationBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecommendationBackend for MockRecommendationBackend {
    async fn generate(&mut self, prompt: &str) -> Result<Vec<Recommendation>, ProviderError> {
        self.prompts.push(prompt.to_string());
        self.outcomes.pop_front().unwrap_or_else(|| {
            Err(ProviderError::MalformedResponse(
                "no queued outcome in MockRecommendationBackend".to_string(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_returns_queued_recommendations_in_order() {
        let mut backend = MockRecommendationBackend::new();
        backend.queue_recommendations(vec![Recommendation::new("First", "r1")]);
        backend.queue_recommendations(vec![Recommendation::new("Second", "r2")]);

        let first = backend.generate("p1").await.unwrap();
        let second = backend.generate("p2").await.unwrap();

        assert_eq!(first[0].career, "First");
        assert_eq!(second[0].career, "Second");
    }

    #[tokio::test]
    async fn mock_returns_queued_error() {
        let mut backend = MockRecommendationBackend::new();
        backend.queue_error(ProviderError::MissingApiKey);

        let err = backend.generate("p").await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingApiKey));
    }

    #[tokio::test]
    async fn mock_without_queued_outcome_errors() {
        let mut backend = MockRecommendationBackend::new();
        let err = backend.generate("p").await.unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn mock_records_received_prompts() {
        let mut backend = MockRecommendationBackend::new();
        backend.queue_recommendations(vec![]);
        backend.generate("the prompt").await.unwrap();

        assert_eq!(backend.prompts(), ["the prompt"]);
        assert_eq!(backend.queued_outcome_count(), 0);
    }
}
