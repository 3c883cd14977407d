//! Assessment session state machine
//!
//! A Session tracks one student's progression through idle, in-progress,
//! and completed. It snapshots the catalog's question sequence when a test
//! starts, so admin edits cannot desynchronize answer indices mid-session,
//! and tags each submission with a generation counter so late-arriving
//! provider results for an abandoned attempt are discarded.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{AssessmentCatalog, AssessmentType};
use crate::error::SessionError;
use crate::recommend::Recommendation;

/// State of an assessment session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No test running; a new one can be started
    Idle,
    /// Answering questions
    InProgress,
    /// Answers submitted; results pending or displayed
    Completed,
}

/// A provider call the session owner must perform after `submit()`
///
/// Carries everything the recommendation client needs plus the generation
/// tag that `apply_results` uses to reject stale resolutions.
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub generation: u64,
    pub assessment: AssessmentType,
    pub questions: Vec<String>,
    pub answers: HashMap<usize, String>,
}

/// One student's attempt at a single assessment
///
/// All mutations are synchronous; the only asynchronous step is the
/// provider call, which the owner performs between `submit()` and
/// `apply_results()`.
pub struct Session {
    state: SessionState,
    assessment: AssessmentType,
    /// Question sequence snapshotted at start time
    questions: Vec<String>,
    /// Free-text answers keyed by question index
    answers: HashMap<usize, String>,
    results: Vec<Recommendation>,
    /// True between submit() and the matching apply_results()
    pending: bool,
    /// Bumped whenever the session leaves the attempt an in-flight
    /// provider call belongs to
    generation: u64,
}

impl Session {
    /// Create a new idle session
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            assessment: AssessmentType::Career,
            questions: Vec::new(),
            answers: HashMap::new(),
            results: Vec::new(),
            pending: false,
            generation: 0,
        }
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The assessment selected for the current or most recent attempt
    pub fn assessment(&self) -> AssessmentType {
        self.assessment
    }

    /// The question sequence snapshotted at start time
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// The answer recorded for a question index, if any
    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    /// Recommendations received for the current attempt
    pub fn results(&self) -> &[Recommendation] {
        &self.results
    }

    /// True while a provider call for the current attempt is in flight
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Generation tag of the current attempt
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a test, clearing any prior answers and results
    ///
    /// Valid from any state. Snapshots the catalog's current question
    /// sequence for `assessment` and invalidates in-flight provider calls.
    pub fn start(&mut self, assessment: AssessmentType, catalog: &AssessmentCatalog) {
        self.generation += 1;
        self.state = SessionState::InProgress;
        self.assessment = assessment;
        self.questions = catalog.questions(assessment).to_vec();
        self.answers.clear();
        self.results.clear();
        self.pending = false;
        debug!(
            %assessment,
            questions = self.questions.len(),
            generation = self.generation,
            "Started assessment"
        );
    }

    /// Record or replace the answer for a question index
    ///
    /// Only valid while in progress. Indices outside the snapshot are
    /// ignored; the caller only edits indices it just displayed.
    pub fn set_answer(
        &mut self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), SessionError> {
        if self.state != SessionState::InProgress {
            return Err(self.invalid_state("InProgress"));
        }
        if index >= self.questions.len() {
            debug!(index, len = self.questions.len(), "Ignoring answer for unknown index");
            return Ok(());
        }
        self.answers.insert(index, text.into());
        Ok(())
    }

    /// True when every question has a non-empty (post-trim) answer
    ///
    /// This is the submit precondition; the UI disables the submit action
    /// while it is false.
    pub fn can_submit(&self) -> bool {
        self.state == SessionState::InProgress
            && (0..self.questions.len())
                .all(|i| self.answers.get(&i).is_some_and(|a| !a.trim().is_empty()))
    }

    /// Abandon the in-progress test and return to idle
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::InProgress {
            return Err(self.invalid_state("InProgress"));
        }
        self.reset_to_idle();
        Ok(())
    }

    /// Submit the completed answers
    ///
    /// Transitions to Completed with results pending and returns the
    /// provider call the owner must perform. The session stays Completed
    /// when the call resolves; `apply_results` only fills in the results.
    pub fn submit(&mut self) -> Result<SubmitRequest, SessionError> {
        if self.state != SessionState::InProgress {
            return Err(self.invalid_state("InProgress"));
        }
        if let Some(index) = (0..self.questions.len())
            .find(|i| !self.answers.get(i).is_some_and(|a| !a.trim().is_empty()))
        {
            return Err(SessionError::Unanswered { index });
        }

        self.state = SessionState::Completed;
        self.pending = true;
        self.results.clear();

        Ok(SubmitRequest {
            generation: self.generation,
            assessment: self.assessment,
            questions: self.questions.clone(),
            answers: self.answers.clone(),
        })
    }

    /// Deliver provider results for a submission
    ///
    /// Applies only when `generation` still matches the current attempt
    /// and the session is still Completed; otherwise the results are
    /// dropped and `false` is returned.
    pub fn apply_results(&mut self, generation: u64, results: Vec<Recommendation>) -> bool {
        if generation != self.generation || self.state != SessionState::Completed {
            debug!(
                generation,
                current = self.generation,
                state = ?self.state,
                "Discarding stale recommendation results"
            );
            return false;
        }
        self.results = results;
        self.pending = false;
        true
    }

    /// Leave the completed state and return to idle
    pub fn restart(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Completed {
            return Err(self.invalid_state("Completed"));
        }
        self.reset_to_idle();
        Ok(())
    }

    fn reset_to_idle(&mut self) {
        self.generation += 1;
        self.state = SessionState::Idle;
        self.questions.clear();
        self.answers.clear();
        self.results.clear();
        self.pending = false;
    }

    fn invalid_state(&self, expected: &str) -> SessionError {
        SessionError::InvalidState {
            expected: expected.to_string(),
            actual: format!("{:?}", self.state),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::fallback_recommendation;

    fn catalog() -> AssessmentCatalog {
        AssessmentCatalog::with_defaults()
    }

    fn answer_all(session: &mut Session) {
        for i in 0..session.questions().len() {
            session.set_answer(i, format!("answer {}", i)).unwrap();
        }
    }

    // ==================== SessionState Tests ====================

    #[test]
    fn session_state_serialization_roundtrip() {
        for state in [
            SessionState::Idle,
            SessionState::InProgress,
            SessionState::Completed,
        ] {
            let json = serde_json::to_string(&state).unwrap();
            let parsed: SessionState = serde_json::from_str(&json).unwrap();
            assert_eq!(state, parsed);
        }
    }

    // ==================== Creation Tests ====================

    #[test]
    fn new_session_starts_idle_and_empty() {
        let session = Session::new();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.questions().is_empty());
        assert!(session.results().is_empty());
        assert!(!session.is_pending());
    }

    // ==================== Start Tests ====================

    #[test]
    fn start_transitions_to_in_progress_with_snapshot() {
        let mut session = Session::new();
        session.start(AssessmentType::Personality, &catalog());

        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.assessment(), AssessmentType::Personality);
        assert_eq!(session.questions().len(), 3);
        assert!(session.answer(0).is_none());
    }

    #[test]
    fn start_clears_prior_answers_and_results() {
        let mut session = Session::new();
        session.start(AssessmentType::Career, &catalog());
        answer_all(&mut session);
        let request = session.submit().unwrap();
        session.apply_results(request.generation, vec![fallback_recommendation()]);

        // Starting again from Completed wipes everything
        session.start(AssessmentType::Skills, &catalog());
        assert_eq!(session.state(), SessionState::InProgress);
        assert!(session.answer(0).is_none());
        assert!(session.results().is_empty());
        assert!(!session.is_pending());
    }

    #[test]
    fn snapshot_is_immune_to_later_catalog_edits() {
        let mut catalog = catalog();
        let mut session = Session::new();
        session.start(AssessmentType::Career, &catalog);

        catalog.remove_question(AssessmentType::Career, 0);
        catalog.remove_question(AssessmentType::Career, 0);

        // Session still sees the three questions it started with
        assert_eq!(session.questions().len(), 3);
    }

    // ==================== Answer / Submit Precondition Tests ====================

    #[test]
    fn set_answer_upserts_without_transition() {
        let mut session = Session::new();
        session.start(AssessmentType::Career, &catalog());

        session.set_answer(0, "first").unwrap();
        session.set_answer(0, "revised").unwrap();

        assert_eq!(session.answer(0), Some("revised"));
        assert_eq!(session.state(), SessionState::InProgress);
    }

    #[test]
    fn set_answer_outside_in_progress_fails() {
        let mut session = Session::new();
        let result = session.set_answer(0, "too early");
        assert!(matches!(result, Err(SessionError::InvalidState { .. })));
    }

    #[test]
    fn set_answer_beyond_snapshot_is_ignored() {
        let mut session = Session::new();
        session.start(AssessmentType::Career, &catalog());
        session.set_answer(99, "nowhere").unwrap();
        assert!(session.answer(99).is_none());
    }

    #[test]
    fn submit_unavailable_until_every_question_answered() {
        let mut session = Session::new();
        session.start(AssessmentType::Personality, &catalog());

        session.set_answer(0, "Lead").unwrap();
        session.set_answer(1, "").unwrap();
        assert!(!session.can_submit());

        session.set_answer(1, "Small group").unwrap();
        assert!(!session.can_submit());

        session.set_answer(2, "Head").unwrap();
        assert!(session.can_submit());
    }

    #[test]
    fn whitespace_only_answer_does_not_satisfy_submit() {
        let mut session = Session::new();
        session.start(AssessmentType::Career, &catalog());
        answer_all(&mut session);
        session.set_answer(1, "   ").unwrap();
        assert!(!session.can_submit());
    }

    #[test]
    fn submit_with_unanswered_question_errors_with_index() {
        let mut session = Session::new();
        session.start(AssessmentType::Career, &catalog());
        session.set_answer(0, "yes").unwrap();
        session.set_answer(2, "yes").unwrap();

        let err = session.submit().unwrap_err();
        assert!(matches!(err, SessionError::Unanswered { index: 1 }));
        assert_eq!(session.state(), SessionState::InProgress);
    }

    // ==================== Submit / Results Tests ====================

    #[test]
    fn submit_enters_completed_with_pending_results() {
        let mut session = Session::new();
        session.start(AssessmentType::Career, &catalog());
        answer_all(&mut session);

        let request = session.submit().unwrap();

        assert_eq!(session.state(), SessionState::Completed);
        assert!(session.is_pending());
        assert!(session.results().is_empty());
        assert_eq!(request.assessment, AssessmentType::Career);
        assert_eq!(request.questions.len(), 3);
        assert_eq!(request.answers.len(), 3);
        assert_eq!(request.generation, session.generation());
    }

    #[test]
    fn apply_results_fills_results_and_clears_pending() {
        let mut session = Session::new();
        session.start(AssessmentType::Career, &catalog());
        answer_all(&mut session);
        let request = session.submit().unwrap();

        let applied = session.apply_results(
            request.generation,
            vec![Recommendation::new("Engineer", "Fits.")],
        );

        assert!(applied);
        assert_eq!(session.state(), SessionState::Completed);
        assert!(!session.is_pending());
        assert_eq!(session.results().len(), 1);
    }

    #[test]
    fn fallback_results_apply_like_any_other() {
        // Provider failure path: the client already converted the error
        // into the fallback card, so the session treats it as a result.
        let mut session = Session::new();
        session.start(AssessmentType::Career, &catalog());
        answer_all(&mut session);
        let request = session.submit().unwrap();

        session.apply_results(request.generation, vec![fallback_recommendation()]);

        assert_eq!(session.state(), SessionState::Completed);
        assert!(!session.is_pending());
        assert_eq!(session.results()[0].career, "Error");
    }

    #[test]
    fn stale_generation_results_are_discarded() {
        let mut session = Session::new();
        session.start(AssessmentType::Career, &catalog());
        answer_all(&mut session);
        let request = session.submit().unwrap();

        // Student restarts before the call resolves
        session.restart().unwrap();
        session.start(AssessmentType::Skills, &catalog());

        let applied = session.apply_results(
            request.generation,
            vec![Recommendation::new("Ghost", "Should not appear.")],
        );

        assert!(!applied);
        assert!(session.results().is_empty());
        assert_eq!(session.assessment(), AssessmentType::Skills);
    }

    #[test]
    fn results_for_wrong_state_are_discarded() {
        let mut session = Session::new();
        session.start(AssessmentType::Career, &catalog());
        answer_all(&mut session);
        let request = session.submit().unwrap();
        session.restart().unwrap();

        // Session is Idle now; even a matching-looking delivery must not apply
        let applied = session.apply_results(request.generation, vec![]);
        assert!(!applied);
        assert_eq!(session.state(), SessionState::Idle);
    }

    // ==================== Cancel / Restart Tests ====================

    #[test]
    fn cancel_returns_to_idle_and_discards_answers() {
        let mut session = Session::new();
        session.start(AssessmentType::Career, &catalog());
        session.set_answer(0, "partial").unwrap();

        session.cancel().unwrap();

        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.answer(0).is_none());
    }

    #[test]
    fn cancel_outside_in_progress_fails() {
        let mut session = Session::new();
        assert!(session.cancel().is_err());
    }

    #[test]
    fn restart_returns_to_idle_and_discards_results() {
        let mut session = Session::new();
        session.start(AssessmentType::Career, &catalog());
        answer_all(&mut session);
        let request = session.submit().unwrap();
        session.apply_results(request.generation, vec![fallback_recommendation()]);

        session.restart().unwrap();

        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.results().is_empty());
    }

    #[test]
    fn restart_outside_completed_fails() {
        let mut session = Session::new();
        assert!(session.restart().is_err());

        session.start(AssessmentType::Career, &catalog());
        assert!(session.restart().is_err());
    }

    #[test]
    fn idle_is_reenterable_indefinitely() {
        let mut session = Session::new();
        for _ in 0..3 {
            session.start(AssessmentType::Career, &catalog());
            answer_all(&mut session);
            let request = session.submit().unwrap();
            session.apply_results(request.generation, vec![]);
            session.restart().unwrap();
            assert_eq!(session.state(), SessionState::Idle);
        }
    }
}
