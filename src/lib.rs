//! # category-quiz
//!
//! A terminal quiz over categorised question files.
//!
//! The heart of the crate is [`session::Session`], a synchronous state
//! machine that tracks selections, locked answers, navigation and scoring.
//! Everything else feeds it questions or draws it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use category_quiz::{Quiz, QuizConfig, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let quiz = Quiz::new(QuizConfig::default());
//!     quiz.run().await
//! }
//! ```

mod app;
mod config;
pub mod data;
pub mod logging;
pub mod models;
pub mod session;
pub mod terminal;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{info, warn};

pub use app::{App, LoadTicket, Screen};
pub use config::{DEFAULT_DATA_DIR, QuizConfig};
pub use data::{Category, FileSource, LoadError, QuestionSet, QuestionSource, load_questions};
pub use models::{Answer, Question, QuestionKind, Selection};
pub use session::Session;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Error type for quiz runs.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("failed to load questions: {0}")]
    Load(#[from] LoadError),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to set up logging: {0}")]
    Logging(#[from] logging::LoggingError),
}

type LoadOutcome = (LoadTicket, Result<QuestionSet, LoadError>);

/// A quiz bound to a question source, ready to run in the terminal.
pub struct Quiz {
    app: App,
    source: Arc<dyn QuestionSource>,
}

impl Quiz {
    /// Create a quiz reading question files from `config.data_dir`.
    pub fn new(config: QuizConfig) -> Self {
        let source = Arc::new(FileSource::new(&config.data_dir));
        Self::with_source(config, source)
    }

    /// Create a quiz over any question source.
    pub fn with_source(config: QuizConfig, source: Arc<dyn QuestionSource>) -> Self {
        Self {
            app: App::new(&config),
            source,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Run the quiz in the terminal until the user quits.
    pub async fn run(mut self) -> Result<(), QuizError> {
        match self.source.fetch_category_list().await {
            Ok(names) => self.app.set_categories(names),
            Err(err) => warn!(error = %err, "category list unavailable, offering all categories only"),
        }

        let (tx, mut rx) = mpsc::unbounded_channel::<LoadOutcome>();
        let ticket = self.app.request_load(self.app.category().clone());
        spawn_load(Arc::clone(&self.source), ticket, tx.clone());

        let mut terminal = terminal::TerminalGuard::enter()?;
        loop {
            while let Ok((ticket, result)) = rx.try_recv() {
                self.app.finish_load(ticket, result);
            }

            terminal.draw(|frame| ui::render(frame, &self.app))?;

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match handle_input(&mut self.app, key.code) {
                Command::Quit => break,
                Command::Fetch(ticket) => spawn_load(Arc::clone(&self.source), ticket, tx.clone()),
                Command::None => {}
            }
        }

        info!("quiz closed");
        Ok(())
    }
}

fn spawn_load(
    source: Arc<dyn QuestionSource>,
    ticket: LoadTicket,
    tx: mpsc::UnboundedSender<LoadOutcome>,
) {
    tokio::spawn(async move {
        let result = load_questions(source.as_ref(), &ticket.category).await;
        // The receiver is gone once the UI has quit.
        let _ = tx.send((ticket, result));
    });
}

/// What the event loop should do after a key press.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    None,
    Quit,
    Fetch(LoadTicket),
}

fn handle_input(app: &mut App, key: KeyCode) -> Command {
    if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q')) {
        return Command::Quit;
    }

    match app.screen() {
        Screen::Loading => Command::None,
        Screen::LoadFailed => handle_load_failed_input(app, key),
        Screen::Welcome => handle_welcome_input(app, key),
        Screen::Quiz => {
            handle_quiz_input(app, key);
            Command::None
        }
        Screen::Results | Screen::Review => {
            handle_result_input(app, key);
            Command::None
        }
    }
}

fn handle_load_failed_input(app: &mut App, key: KeyCode) -> Command {
    match key {
        KeyCode::Char('r') | KeyCode::Char('R') => Command::Fetch(app.retry_load()),
        KeyCode::Tab => app.next_category().map_or(Command::None, Command::Fetch),
        _ => Command::None,
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> Command {
    match key {
        KeyCode::Enter => app.start(),
        KeyCode::Char('s') | KeyCode::Char('S') => app.toggle_question_shuffle(),
        KeyCode::Char('c') | KeyCode::Char('C') => app.shuffle_choices(),
        KeyCode::Char('a') | KeyCode::Char('A') => app.toggle_show_correct_answers(),
        KeyCode::Tab => return app.next_category().map_or(Command::None, Command::Fetch),
        _ => {}
    }
    Command::None
}

fn handle_quiz_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor_down(),
        KeyCode::Char(' ') => app.select_at_cursor(),
        KeyCode::Enter => app.confirm(),
        KeyCode::Left | KeyCode::Char('h') => app.previous(),
        KeyCode::Char('x') | KeyCode::Char('X') => app.submit_quiz(),
        _ => {}
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('v') | KeyCode::Char('V') => app.toggle_review(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.retake(),
        _ => {}
    }
}
