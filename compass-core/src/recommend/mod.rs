//! Recommendation provider layer
//!
//! The backend trait abstracts the actual generation service so the
//! session and UI can be tested against a scripted mock.

mod client;
mod gemini;
mod mock;
mod prompt;
mod traits;

pub use client::{FALLBACK_CAREER, FALLBACK_REASON, RecommendationClient, fallback_recommendation};
pub use gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiBackend, GeminiConfig};
pub use mock::MockRecommendationBackend;
pub use prompt::build_prompt;
pub use traits::{Recommendation, RecommendationBackend};
