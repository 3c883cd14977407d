//! Student view: pick an assessment, answer its questions, see results.

use compass_core::{AssessmentType, SessionState};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::ViewRenderer;
use crate::App;

/// The assessment-taking tab.
#[derive(Debug, Clone, Default)]
pub struct StudentView;

impl ViewRenderer for StudentView {
    fn render(&self, app: &App, frame: &mut Frame, area: Rect) {
        match app.session.state() {
            SessionState::Idle => render_picker(frame, area, app),
            SessionState::InProgress => render_questions(frame, area, app),
            SessionState::Completed => render_results(frame, area, app),
        }
    }
}

fn render_picker(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut lines = vec![
        Line::from(Span::styled("Take an Assessment", theme.bold)),
        Line::from(Span::styled(
            "Select a test to begin your career discovery journey.",
            theme.dim,
        )),
        Line::default(),
    ];

    for (i, assessment) in AssessmentType::ALL.iter().enumerate() {
        let selected = i == app.student.selected_type;
        let marker = if selected { "> " } else { "  " };
        let style = if selected {
            Style::default().fg(theme.highlight).bg(theme.selection)
        } else {
            Style::default().fg(theme.fg)
        };
        lines.push(Line::from(Span::styled(
            format!("{}{}", marker, assessment.title()),
            style,
        )));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Up/Down select · Enter start · Tab admin · q quit",
        theme.dim,
    )));

    let block = Block::default()
        .title("Assessment")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_questions(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let chunks = Layout::default()
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let mut lines = Vec::new();
    for (i, question) in app.session.questions().iter().enumerate() {
        let focused = i == app.student.focused_question;
        let answer = app.session.answer(i).unwrap_or_default();

        let question_style = if focused {
            Style::default().fg(theme.highlight)
        } else {
            Style::default().fg(theme.fg)
        };
        lines.push(Line::from(Span::styled(
            format!("{}. {}", i + 1, question),
            question_style,
        )));

        let answer_text = if focused {
            format!("   > {}_", answer)
        } else if answer.trim().is_empty() {
            "   (not answered)".to_string()
        } else {
            format!("   {}", answer)
        };
        let answer_style = if focused {
            Style::default().fg(theme.accent)
        } else if answer.trim().is_empty() {
            theme.dim
        } else {
            Style::default().fg(theme.fg)
        };
        lines.push(Line::from(Span::styled(answer_text, answer_style)));
        lines.push(Line::default());
    }

    let block = Block::default()
        .title(app.session.assessment().title())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        chunks[0],
    );

    let hint = if app.session.can_submit() {
        Span::styled("Enter submit · Up/Down move · Esc cancel", theme.bold)
    } else {
        Span::styled(
            "Answer every question to submit · Up/Down move · Esc cancel",
            theme.dim,
        )
    };
    frame.render_widget(Paragraph::new(Line::from(hint)), chunks[1]);
}

fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut lines = vec![Line::from(Span::styled("Your Results", theme.bold)), Line::default()];

    if app.session.is_pending() {
        lines.push(Line::from(Span::styled(
            "Our AI is analyzing your results...",
            Style::default().fg(theme.accent),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Recommended Career Paths:",
            Style::default().fg(theme.accent),
        )));
        lines.push(Line::default());
        for recommendation in app.session.results() {
            let career_style = if recommendation.career == "Error" {
                Style::default().fg(theme.error)
            } else {
                theme.bold
            };
            lines.push(Line::from(Span::styled(
                recommendation.career.clone(),
                career_style,
            )));
            lines.push(Line::from(Span::styled(
                format!("  {}", recommendation.reason),
                Style::default().fg(theme.fg),
            )));
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(
            "Enter: take another test",
            theme.dim,
        )));
    }

    let block = Block::default()
        .title("Results")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}
