//! Recommendation client with the fallback contract
//!
//! The client is the only component that talks to a backend. It never
//! surfaces errors to its caller: the UI has no separate error-display
//! path, so the fallback recommendation card IS the error message.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::prompt::build_prompt;
use super::traits::{Recommendation, RecommendationBackend};
use crate::catalog::AssessmentType;

/// Career shown on the fallback card
pub const FALLBACK_CAREER: &str = "Error";

/// Reason shown on the fallback card
pub const FALLBACK_REASON: &str = "Could not generate recommendations at this time. \
     Please check your connection or API key and try again.";

/// The single recommendation returned when a provider call fails
pub fn fallback_recommendation() -> Recommendation {
    Recommendation::new(FALLBACK_CAREER, FALLBACK_REASON)
}

/// Client wrapping a recommendation backend
///
/// Formats the counselor prompt, performs exactly one backend call per
/// request, and maps any failure to the one-element fallback sequence.
/// No retries, no timeout policy beyond what the transport provides.
pub struct RecommendationClient {
    backend: Box<dyn RecommendationBackend>,
}

impl RecommendationClient {
    pub fn new(backend: Box<dyn RecommendationBackend>) -> Self {
        Self { backend }
    }

    /// Request recommendations for a completed assessment
    ///
    /// `questions` is the sequence active at submit time; `answers` maps a
    /// subset of its indices to free-text answers. Missing entries reach
    /// the provider as "Not answered".
    pub async fn request_recommendations(
        &mut self,
        assessment: AssessmentType,
        questions: &[String],
        answers: &HashMap<usize, String>,
    ) -> Vec<Recommendation> {
        let prompt = build_prompt(assessment, questions, answers);

        match self.backend.generate(&prompt).await {
            Ok(recommendations) => {
                debug!(
                    %assessment,
                    count = recommendations.len(),
                    "Received recommendations"
                );
                recommendations
            }
            Err(error) => {
                warn!(%assessment, error = %error, "Recommendation request failed");
                vec![fallback_recommendation()]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::recommend::MockRecommendationBackend;

    fn questions(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn successful_response_is_returned_verbatim() {
        let mut backend = MockRecommendationBackend::new();
        backend.queue_recommendations(vec![
            Recommendation::new("Engineer", "Puzzles."),
            Recommendation::new("Analyst", "Data."),
        ]);
        let mut client = RecommendationClient::new(Box::new(backend));

        let recs = client
            .request_recommendations(AssessmentType::Career, &questions(&["Q?"]), &HashMap::new())
            .await;

        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].career, "Engineer");
        assert_eq!(recs[1].career, "Analyst");
    }

    #[tokio::test]
    async fn empty_recommendation_list_is_not_the_fallback() {
        let mut backend = MockRecommendationBackend::new();
        backend.queue_recommendations(vec![]);
        let mut client = RecommendationClient::new(Box::new(backend));

        let recs = client
            .request_recommendations(AssessmentType::Career, &questions(&["Q?"]), &HashMap::new())
            .await;

        assert!(recs.is_empty());
    }

    #[tokio::test]
    async fn backend_error_becomes_single_fallback_card() {
        let mut backend = MockRecommendationBackend::new();
        backend.queue_error(ProviderError::Api {
            status: 500,
            message: "boom".to_string(),
        });
        let mut client = RecommendationClient::new(Box::new(backend));

        let recs = client
            .request_recommendations(AssessmentType::Skills, &questions(&["Q?"]), &HashMap::new())
            .await;

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].career, FALLBACK_CAREER);
        assert_eq!(recs[0].reason, FALLBACK_REASON);
    }

    #[tokio::test]
    async fn missing_api_key_also_takes_the_fallback_path() {
        let mut backend = MockRecommendationBackend::new();
        backend.queue_error(ProviderError::MissingApiKey);
        let mut client = RecommendationClient::new(Box::new(backend));

        let recs = client
            .request_recommendations(
                AssessmentType::Personality,
                &questions(&["Q?"]),
                &HashMap::new(),
            )
            .await;

        assert_eq!(recs, vec![fallback_recommendation()]);
    }

    #[tokio::test]
    async fn client_makes_exactly_one_backend_call_per_request() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        use async_trait::async_trait;

        struct CountingBackend {
            calls: Arc<AtomicUsize>,
        }

        #[async_trait]
        impl RecommendationBackend for CountingBackend {
            async fn generate(
                &mut self,
                _prompt: &str,
            ) -> Result<Vec<Recommendation>, ProviderError> {
                self.calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec![])
            }
        }

        let calls = Arc::new(AtomicUsize::new(0));
        let backend = CountingBackend {
            calls: Arc::clone(&calls),
        };
        let mut client = RecommendationClient::new(Box::new(backend));

        client
            .request_recommendations(AssessmentType::Career, &questions(&["Q?"]), &HashMap::new())
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
