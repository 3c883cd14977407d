//! Terminal UI for compass.
//!
//! This crate provides the interactive shell for the career assessment
//! tool: a student tab for taking tests and an admin tab for editing the
//! question catalog, built on ratatui and crossterm.

mod app;
mod state;
mod terminal;
mod theme;
mod views;

pub use app::App;
pub use state::{AdminState, StudentState, UiView};
pub use terminal::TerminalGuard;
pub use theme::{Theme, compass_default};
pub use views::{AdminView, StudentView, ViewRenderer};
