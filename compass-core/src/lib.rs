//! compass-core: Core library for the compass career assessment tool
//!
//! This crate provides the foundational components for compass:
//!
//! - **Assessment catalog** - [`AssessmentCatalog`] holds the question
//!   sequences for each [`AssessmentType`] and supports admin edits
//! - **Session state machine** - [`Session`] tracks one student's progress
//!   through an assessment from idle to completed
//! - **Recommendation layer** - [`RecommendationClient`] formats the
//!   counselor prompt, calls a [`RecommendationBackend`], and maps every
//!   provider failure to a single fallback card
//!
//! # Quick Start
//!
//! ```no_run
//! use compass_core::{AssessmentCatalog, AssessmentType, Session};
//!
//! let catalog = AssessmentCatalog::with_defaults();
//! let mut session = Session::new();
//! session.start(AssessmentType::Career, &catalog);
//!
//! for (i, question) in session.questions().to_vec().iter().enumerate() {
//!     println!("{}. {}", i + 1, question);
//!     session.set_answer(i, "my answer").unwrap();
//! }
//!
//! let request = session.submit().unwrap();
//! // Hand `request` to a RecommendationClient, then feed the results
//! // back with `session.apply_results(request.generation, results)`.
//! ```

pub mod catalog;
pub mod error;
pub mod recommend;
pub mod session;

// Re-export key types for convenience
pub use catalog::{AssessmentCatalog, AssessmentType};
pub use error::{ProviderError, SessionError};
pub use recommend::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, FALLBACK_CAREER, FALLBACK_REASON, GeminiBackend, GeminiConfig,
    MockRecommendationBackend, Recommendation, RecommendationBackend, RecommendationClient,
    fallback_recommendation,
};
pub use session::{Session, SessionState, SubmitRequest};
