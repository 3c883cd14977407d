//! Indigo theme for the compass TUI.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI.
///
/// Contains the colors and styles needed to render the interface
/// with a consistent indigo-on-dark look.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // UI element colors
    pub border: Color,
    pub selection: Color,
    pub highlight: Color,

    // Text styles
    pub bold: Style,
    pub dim: Style,
}

/// Creates the default compass theme.
///
/// Indigo accent over a dark slate background, echoing the product's
/// original indigo/slate palette.
pub fn compass_default() -> Theme {
    let fg = Color::Rgb(226, 232, 240); // #e2e8f0 slate-200

    Theme {
        name: "compass".into(),

        // Base colors
        bg: Color::Rgb(15, 23, 42), // #0f172a slate-900
        fg,
        accent: Color::Rgb(129, 140, 248), // #818cf8 indigo-400
        success: Color::Rgb(74, 222, 128), // #4ade80
        warning: Color::Rgb(250, 204, 21), // #facc15
        error: Color::Rgb(248, 113, 113),  // #f87171

        // UI element colors
        border: Color::Rgb(71, 85, 105),      // #475569 slate-600
        selection: Color::Rgb(49, 46, 129),   // #312e81 indigo-900
        highlight: Color::Rgb(165, 180, 252), // #a5b4fc indigo-300

        // Text styles
        bold: Style::default().fg(fg).add_modifier(Modifier::BOLD),
        dim: Style::default().fg(fg).add_modifier(Modifier::DIM),
    }
}
