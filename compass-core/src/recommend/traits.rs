//! RecommendationBackend trait and related types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// A single career recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// The name of the recommended career
    pub career: String,
    /// A brief explanation of why this career fits the answers
    pub reason: String,
}

impl Recommendation {
    pub fn new(career: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            career: career.into(),
            reason: reason.into(),
        }
    }
}

/// Trait for recommendation generation backends
///
/// Implementations turn a fully-formatted counselor prompt into a list
/// of recommendations, whether via a remote API or a scripted mock.
#[async_trait]
pub trait RecommendationBackend: Send + Sync {
    /// Generate recommendations for the given prompt
    ///
    /// An empty list is a valid success; errors are reserved for
    /// transport and response-shape failures.
    async fn generate(&mut self, prompt: &str) -> Result<Vec<Recommendation>, ProviderError>;
}
