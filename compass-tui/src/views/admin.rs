//! Admin view: edit each assessment's question list.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::ViewRenderer;
use crate::App;

/// The catalog-editing tab.
#[derive(Debug, Clone, Default)]
pub struct AdminView;

impl ViewRenderer for AdminView {
    fn render(&self, app: &App, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .constraints([
                Constraint::Length(5),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        render_editor(frame, chunks[0], app);
        render_question_list(frame, chunks[1], app);

        let hint = Span::styled(
            "Left/Right test type · type to edit · Enter add · Up/Down select · Del remove",
            app.theme.dim,
        );
        frame.render_widget(Paragraph::new(Line::from(hint)), chunks[2]);
    }
}

fn render_editor(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let assessment = app.admin.assessment();

    let lines = vec![
        Line::from(vec![
            Span::styled("Test Type: ", Style::default().fg(theme.fg)),
            Span::styled(
                format!("< {} >", assessment.title()),
                Style::default().fg(theme.highlight),
            ),
        ]),
        Line::from(vec![
            Span::styled("New Question: ", Style::default().fg(theme.fg)),
            Span::styled(
                format!("{}_", app.admin.input),
                Style::default().fg(theme.accent),
            ),
        ]),
        Line::from(Span::styled(
            "Questions are added to the end of the list.",
            theme.dim,
        )),
    ];

    let block = Block::default()
        .title("Manage Assessments")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_question_list(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let assessment = app.admin.assessment();
    let questions = app.catalog.questions(assessment);

    let lines: Vec<Line> = if questions.is_empty() {
        vec![Line::from(Span::styled(
            "No questions for this assessment yet.",
            theme.dim,
        ))]
    } else {
        questions
            .iter()
            .enumerate()
            .map(|(i, question)| {
                let selected = i == app.admin.selected_question;
                let marker = if selected { "> " } else { "  " };
                let style = if selected {
                    Style::default().fg(theme.highlight).bg(theme.selection)
                } else {
                    Style::default().fg(theme.fg)
                };
                Line::from(Span::styled(
                    format!("{}{}. {}", marker, i + 1, question),
                    style,
                ))
            })
            .collect()
    };

    let block = Block::default()
        .title(format!("{} Questions", assessment.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}
