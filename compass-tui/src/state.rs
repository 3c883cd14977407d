//! Application state for the TUI.

use compass_core::AssessmentType;

/// The top-level tab currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiView {
    #[default]
    Student,
    Admin,
}

impl UiView {
    /// The other tab.
    pub fn toggled(self) -> Self {
        match self {
            UiView::Student => UiView::Admin,
            UiView::Admin => UiView::Student,
        }
    }
}

/// Cursor state for the student tab.
#[derive(Debug, Clone, Default)]
pub struct StudentState {
    /// Index into [`AssessmentType::ALL`] for the idle picker.
    pub selected_type: usize,
    /// Question index focused while answering.
    pub focused_question: usize,
}

impl StudentState {
    /// The assessment type currently selected in the picker.
    pub fn assessment(&self) -> AssessmentType {
        AssessmentType::ALL[self.selected_type % AssessmentType::ALL.len()]
    }

    /// Move the picker selection up.
    pub fn select_prev_type(&mut self) {
        let len = AssessmentType::ALL.len();
        self.selected_type = (self.selected_type + len - 1) % len;
    }

    /// Move the picker selection down.
    pub fn select_next_type(&mut self) {
        self.selected_type = (self.selected_type + 1) % AssessmentType::ALL.len();
    }
}

/// Cursor and input state for the admin tab.
#[derive(Debug, Clone, Default)]
pub struct AdminState {
    /// Index into [`AssessmentType::ALL`] for the type selector.
    pub selected_type: usize,
    /// New-question input buffer.
    pub input: String,
    /// Selected index in the question list.
    pub selected_question: usize,
}

impl AdminState {
    /// The assessment type whose questions are being edited.
    pub fn assessment(&self) -> AssessmentType {
        AssessmentType::ALL[self.selected_type % AssessmentType::ALL.len()]
    }

    /// Switch to the previous assessment type.
    pub fn select_prev_type(&mut self) {
        let len = AssessmentType::ALL.len();
        self.selected_type = (self.selected_type + len - 1) % len;
        self.selected_question = 0;
    }

    /// Switch to the next assessment type.
    pub fn select_next_type(&mut self) {
        self.selected_type = (self.selected_type + 1) % AssessmentType::ALL.len();
        self.selected_question = 0;
    }

    /// Keep the question selection within the current list.
    pub fn clamp_selection(&mut self, question_count: usize) {
        if question_count == 0 {
            self.selected_question = 0;
        } else if self.selected_question >= question_count {
            self.selected_question = question_count - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ui_view_defaults_to_student() {
        assert_eq!(UiView::default(), UiView::Student);
    }

    #[test]
    fn ui_view_toggles_between_tabs() {
        assert_eq!(UiView::Student.toggled(), UiView::Admin);
        assert_eq!(UiView::Admin.toggled(), UiView::Student);
    }

    #[test]
    fn student_state_defaults_to_career() {
        let state = StudentState::default();
        assert_eq!(state.assessment(), AssessmentType::Career);
    }

    #[test]
    fn student_type_selection_wraps_both_ways() {
        let mut state = StudentState::default();
        state.select_prev_type();
        assert_eq!(state.assessment(), AssessmentType::Skills);

        state.select_next_type();
        assert_eq!(state.assessment(), AssessmentType::Career);

        state.select_next_type();
        assert_eq!(state.assessment(), AssessmentType::Personality);
    }

    #[test]
    fn admin_type_switch_resets_question_selection() {
        let mut state = AdminState {
            selected_question: 2,
            ..Default::default()
        };
        state.select_next_type();
        assert_eq!(state.assessment(), AssessmentType::Personality);
        assert_eq!(state.selected_question, 0);
    }

    #[test]
    fn admin_clamp_selection_handles_shrinking_lists() {
        let mut state = AdminState {
            selected_question: 5,
            ..Default::default()
        };
        state.clamp_selection(3);
        assert_eq!(state.selected_question, 2);

        state.clamp_selection(0);
        assert_eq!(state.selected_question, 0);
    }
}
