//! Assessment types and the in-memory question catalog
//!
//! The catalog owns one ordered question sequence per assessment type.
//! It is constructed once per process and passed by reference to the
//! UI and session layers, never held as ambient global state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// The three built-in assessment types
///
/// This is a closed set: catalog operations may edit a type's question
/// sequence but can never add or remove a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentType {
    Career,
    Personality,
    Skills,
}

impl AssessmentType {
    /// All assessment types, in display order
    pub const ALL: [AssessmentType; 3] = [
        AssessmentType::Career,
        AssessmentType::Personality,
        AssessmentType::Skills,
    ];

    /// Human-readable title used in prompts and headers
    pub fn title(&self) -> &'static str {
        match self {
            AssessmentType::Career => "Career Test",
            AssessmentType::Personality => "Personality Test",
            AssessmentType::Skills => "Skills Evaluation",
        }
    }
}

impl std::fmt::Display for AssessmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AssessmentType::Career => "career",
            AssessmentType::Personality => "personality",
            AssessmentType::Skills => "skills",
        };
        write!(f, "{}", name)
    }
}

/// In-memory mapping from assessment type to its ordered question list
///
/// Every [`AssessmentType`] always has an entry, possibly empty. Ordering
/// is significant: the display order defines the index used to correlate
/// a student's answers with questions.
#[derive(Debug, Clone)]
pub struct AssessmentCatalog {
    questions: HashMap<AssessmentType, Vec<String>>,
}

impl AssessmentCatalog {
    /// Create an empty catalog with a (zero-length) sequence for every type
    pub fn new() -> Self {
        let mut questions = HashMap::new();
        for assessment in AssessmentType::ALL {
            questions.insert(assessment, Vec::new());
        }
        Self { questions }
    }

    /// Create a catalog seeded with the built-in question sets
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        for (assessment, defaults) in default_questions() {
            for question in defaults {
                catalog.add_question(assessment, question);
            }
        }
        catalog
    }

    /// The ordered question sequence for an assessment type
    pub fn questions(&self, assessment: AssessmentType) -> &[String] {
        // Every type is inserted at construction and never removed
        self.questions
            .get(&assessment)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of questions for an assessment type
    pub fn question_count(&self, assessment: AssessmentType) -> usize {
        self.questions(assessment).len()
    }

    /// Append a question to the end of an assessment's sequence
    ///
    /// No deduplication; callers are expected to reject blank input
    /// before reaching the catalog.
    pub fn add_question(&mut self, assessment: AssessmentType, question: impl Into<String>) {
        let question = question.into();
        debug!(%assessment, question = %question, "Adding question to catalog");
        self.questions.entry(assessment).or_default().push(question);
    }

    /// Remove the question at `index`, shifting later questions down
    ///
    /// Out-of-bounds indices are a silent no-op: the caller only ever
    /// removes indices it just displayed.
    pub fn remove_question(&mut self, assessment: AssessmentType, index: usize) {
        let Some(sequence) = self.questions.get_mut(&assessment) else {
            return;
        };
        if index >= sequence.len() {
            debug!(
                %assessment,
                index,
                len = sequence.len(),
                "Ignoring out-of-bounds question removal"
            );
            return;
        }
        sequence.remove(index);
    }
}

impl Default for AssessmentCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in question sets shipped with compass
fn default_questions() -> [(AssessmentType, [&'static str; 3]); 3] {
    [
        (
            AssessmentType::Career,
            [
                "Do you enjoy solving complex puzzles and problems?",
                "Are you interested in how technology shapes the world?",
                "Do you prefer tasks that have a clear, measurable outcome?",
            ],
        ),
        (
            AssessmentType::Personality,
            [
                "When facing a group project, do you naturally take the lead or prefer to play a supporting role?",
                "Are you more energized by interacting with a large group of people or by having a deep conversation with one or two individuals?",
                "Do you make decisions more with your head (logic) or your heart (feelings)?",
            ],
        ),
        (
            AssessmentType::Skills,
            [
                "On a scale of 1-5, how comfortable are you with public speaking?",
                "On a scale of 1-5, how would you rate your ability to work with data (spreadsheets, analytics)?",
                "On a scale of 1-5, how proficient are you in a creative skill (e.g., writing, design, music)?",
            ],
        ),
    ]
}
