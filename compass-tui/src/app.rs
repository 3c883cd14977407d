//! Main application struct and event loop for the compass TUI.
//!
//! The App owns the catalog, the session state machine, and the
//! recommendation client. User intents are handled one at a time on the
//! event loop; the only asynchronous work is the provider call spawned on
//! submit, whose result comes back through a channel tagged with the
//! session generation so stale resolutions are dropped.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tokio::sync::{Mutex, mpsc};

use compass_core::{
    AssessmentCatalog, Recommendation, RecommendationClient, Session, SessionState,
};

use crate::state::{AdminState, StudentState, UiView};
use crate::theme::{Theme, compass_default};
use crate::terminal::TerminalGuard;
use crate::views::{AdminView, StudentView, ViewRenderer};

/// A provider resolution: the submission's generation tag and its results.
type ProviderResolution = (u64, Vec<Recommendation>);

/// Main TUI application.
pub struct App {
    pub catalog: AssessmentCatalog,
    pub session: Session,
    pub view: UiView,
    pub student: StudentState,
    pub admin: AdminState,
    pub theme: Theme,
    pub running: bool,
    /// Recommendation client, shared with spawned provider calls.
    client: Arc<Mutex<RecommendationClient>>,
    /// Sender cloned into each spawned provider call.
    results_tx: mpsc::UnboundedSender<ProviderResolution>,
    /// Receiver drained on every tick.
    results_rx: mpsc::UnboundedReceiver<ProviderResolution>,
}

impl App {
    /// Creates a new App over a catalog and a recommendation client.
    pub fn new(catalog: AssessmentCatalog, client: RecommendationClient) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            catalog,
            session: Session::new(),
            view: UiView::default(),
            student: StudentState::default(),
            admin: AdminState::default(),
            theme: compass_default(),
            running: true,
            client: Arc::new(Mutex::new(client)),
            results_tx,
            results_rx,
        }
    }

    /// Handles a key event.
    ///
    /// Ctrl-C always quits and Tab always switches tabs; everything else
    /// is routed to the active view.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }
        if key.code == KeyCode::Tab {
            self.view = self.view.toggled();
            return;
        }

        match self.view {
            UiView::Student => self.handle_student_key(key),
            UiView::Admin => self.handle_admin_key(key),
        }
    }

    fn handle_student_key(&mut self, key: KeyEvent) {
        match self.session.state() {
            SessionState::Idle => match key.code {
                KeyCode::Up => self.student.select_prev_type(),
                KeyCode::Down => self.student.select_next_type(),
                KeyCode::Enter => self.start_test(),
                KeyCode::Char('q') => self.running = false,
                _ => {}
            },
            SessionState::InProgress => match key.code {
                KeyCode::Up => {
                    self.student.focused_question = self.student.focused_question.saturating_sub(1);
                }
                KeyCode::Down => {
                    if self.student.focused_question + 1 < self.session.questions().len() {
                        self.student.focused_question += 1;
                    }
                }
                KeyCode::Char(c) => self.edit_focused_answer(|answer| answer.push(c)),
                KeyCode::Backspace => self.edit_focused_answer(|answer| {
                    answer.pop();
                }),
                KeyCode::Enter => self.submit_answers(),
                KeyCode::Esc => self.cancel_test(),
                _ => {}
            },
            SessionState::Completed => match key.code {
                KeyCode::Enter | KeyCode::Char('r') => self.restart_test(),
                KeyCode::Char('q') => self.running = false,
                _ => {}
            },
        }
    }

    fn handle_admin_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => self.admin.select_prev_type(),
            KeyCode::Right => self.admin.select_next_type(),
            KeyCode::Up => {
                self.admin.selected_question = self.admin.selected_question.saturating_sub(1);
            }
            KeyCode::Down => {
                let count = self.catalog.question_count(self.admin.assessment());
                if count > 0 && self.admin.selected_question + 1 < count {
                    self.admin.selected_question += 1;
                }
            }
            KeyCode::Char(c) => self.admin.input.push(c),
            KeyCode::Backspace => {
                self.admin.input.pop();
            }
            KeyCode::Enter => self.add_question(),
            KeyCode::Delete => self.remove_selected_question(),
            KeyCode::Esc => self.admin.input.clear(),
            _ => {}
        }
    }

    fn start_test(&mut self) {
        self.session.start(self.student.assessment(), &self.catalog);
        self.student.focused_question = 0;
    }

    fn edit_focused_answer(&mut self, edit: impl FnOnce(&mut String)) {
        let index = self.student.focused_question;
        let mut answer = self
            .session
            .answer(index)
            .map(str::to_string)
            .unwrap_or_default();
        edit(&mut answer);
        if let Err(error) = self.session.set_answer(index, answer) {
            tracing::debug!(error = %error, "Ignoring answer edit");
        }
    }

    fn cancel_test(&mut self) {
        if let Err(error) = self.session.cancel() {
            tracing::debug!(error = %error, "Ignoring cancel");
        }
    }

    fn restart_test(&mut self) {
        if let Err(error) = self.session.restart() {
            tracing::debug!(error = %error, "Ignoring restart");
        }
    }

    fn add_question(&mut self) {
        let question = self.admin.input.trim().to_string();
        if question.is_empty() {
            return;
        }
        self.catalog.add_question(self.admin.assessment(), question);
        self.admin.input.clear();
    }

    fn remove_selected_question(&mut self) {
        let assessment = self.admin.assessment();
        if self.catalog.question_count(assessment) == 0 {
            return;
        }
        self.catalog
            .remove_question(assessment, self.admin.selected_question);
        self.admin
            .clamp_selection(self.catalog.question_count(assessment));
    }

    /// Submits the current answers and spawns the provider call.
    ///
    /// The submit precondition (every question answered) is enforced by
    /// the session; an Enter on an incomplete form does nothing.
    fn submit_answers(&mut self) {
        let request = match self.session.submit() {
            Ok(request) => request,
            Err(error) => {
                tracing::debug!(error = %error, "Submit unavailable");
                return;
            }
        };

        let client = Arc::clone(&self.client);
        let tx = self.results_tx.clone();
        tokio::spawn(async move {
            let results = client
                .lock()
                .await
                .request_recommendations(request.assessment, &request.questions, &request.answers)
                .await;
            // Send failure means the app is shutting down
            let _ = tx.send((request.generation, results));
        });
    }

    /// Processes async updates: applies any resolved provider calls.
    ///
    /// The session drops resolutions whose generation no longer matches,
    /// so a restart racing an in-flight call cannot corrupt results.
    pub fn tick(&mut self) {
        while let Ok((generation, results)) = self.results_rx.try_recv() {
            self.session.apply_results(generation, results);
        }
    }

    /// Renders the application to the terminal frame.
    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(frame.area());

        self.render_header(frame, chunks[0]);

        match self.view {
            UiView::Student => StudentView.render(self, frame, chunks[1]),
            UiView::Admin => AdminView.render(self, frame, chunks[1]),
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let tab_style = |active: bool| {
            if active {
                Style::default().fg(self.theme.highlight).bg(self.theme.selection)
            } else {
                Style::default().fg(self.theme.fg)
            }
        };

        let line = Line::from(vec![
            Span::styled("AI-Powered Career Assessment", self.theme.bold),
            Span::raw("   "),
            Span::styled(" Student ", tab_style(self.view == UiView::Student)),
            Span::raw(" "),
            Span::styled(" Admin ", tab_style(self.view == UiView::Admin)),
        ]);

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(self.theme.border));
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    /// Runs the main event loop.
    ///
    /// The guard holds the terminal for the duration of the loop and
    /// restores it when dropped, whether the loop finished or failed.
    pub async fn run(&mut self) -> io::Result<()> {
        let mut terminal = TerminalGuard::acquire()?;
        self.event_loop(&mut terminal).await
    }

    /// The core event loop. Separated from `run` for testability.
    async fn event_loop(&mut self, terminal: &mut TerminalGuard) -> io::Result<()> {
        while self.running {
            // Render
            terminal.draw(|f| self.render(f))?;

            // Handle input with timeout for tick
            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key);
            }

            // Process async updates
            self.tick();
        }

        Ok(())
    }
}
