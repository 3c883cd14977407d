//! The two tabs of the compass TUI: taking assessments and editing them.

mod admin;
mod student;

pub use admin::AdminView;
pub use student::StudentView;

use ratatui::{Frame, layout::Rect};

use crate::App;

/// Rendering behavior shared by the tabs.
///
/// A view draws itself into the area below the header; everything it
/// shows is read off the [`App`], so views stay stateless.
pub trait ViewRenderer {
    fn render(&self, app: &App, frame: &mut Frame, area: Rect);
}
