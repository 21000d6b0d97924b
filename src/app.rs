use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::QuizConfig;
use crate::data::{Category, LoadError, QuestionSet};
use crate::models::Question;
use crate::session::{Action, Env, LoadOptions, Permuter, RandomPermuter, Session, SessionStatus};

/// Identifies one fetch request. Results carrying an older ticket are
/// dropped so a slow fetch cannot overwrite a newer category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub category: Category,
}

/// Which screen should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    LoadFailed,
    Welcome,
    Quiz,
    Results,
    Review,
}

pub struct App {
    session: Session,
    permuter: Box<dyn Permuter + Send>,
    category: Category,
    categories: Vec<Category>,
    pending: Option<LoadTicket>,
    generation: u64,
    load_error: Option<String>,
    failed_categories: Vec<String>,
    /// Questions from the last successful load, in source order.
    loaded: Vec<Question>,
    show_correct_answers: bool,
    cursor: usize,
    reviewing: bool,
    result_scroll: usize,
}

impl App {
    pub fn new(config: &QuizConfig) -> Self {
        Self::with_permuter(config, Box::new(RandomPermuter::new()))
    }

    pub fn with_permuter(config: &QuizConfig, permuter: Box<dyn Permuter + Send>) -> Self {
        let mut session = Session::new();
        if config.shuffle_questions {
            session.toggle_question_shuffle();
        }

        Self {
            session,
            permuter,
            category: config.category.clone(),
            categories: vec![Category::All],
            pending: None,
            generation: 0,
            load_error: None,
            failed_categories: Vec::new(),
            loaded: Vec::new(),
            show_correct_answers: config.show_correct_answers,
            cursor: 0,
            reviewing: false,
            result_scroll: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn failed_categories(&self) -> &[String] {
        &self.failed_categories
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn show_correct_answers(&self) -> bool {
        self.show_correct_answers
    }

    pub fn shuffle_questions(&self) -> bool {
        self.session.shuffle_questions()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn screen(&self) -> Screen {
        if self.is_loading() {
            return Screen::Loading;
        }
        if self.load_error.is_some() {
            return Screen::LoadFailed;
        }
        match self.session.status() {
            SessionStatus::Ready => Screen::Welcome,
            SessionStatus::InProgress => Screen::Quiz,
            SessionStatus::Completed if self.reviewing => Screen::Review,
            SessionStatus::Completed => Screen::Results,
        }
    }

    /// Categories offered on the welcome screen. `All` always comes first.
    pub fn set_categories(&mut self, names: Vec<String>) {
        self.categories = std::iter::once(Category::All)
            .chain(names.into_iter().map(Category::Named))
            .collect();
    }

    /// Start a fetch for `category`, superseding any fetch in flight.
    pub fn request_load(&mut self, category: Category) -> LoadTicket {
        self.generation += 1;
        let ticket = LoadTicket {
            generation: self.generation,
            category: category.clone(),
        };
        if let Some(stale) = self.pending.replace(ticket.clone()) {
            debug!(generation = stale.generation, category = %stale.category, "superseding load");
        }
        self.category = category;
        self.load_error = None;
        ticket
    }

    /// Apply a finished fetch. Returns `false` when the ticket is stale.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<QuestionSet, LoadError>) -> bool {
        if self.pending.as_ref() != Some(&ticket) {
            debug!(
                generation = ticket.generation,
                category = %ticket.category,
                "discarding stale load result"
            );
            return false;
        }
        self.pending = None;

        let options = LoadOptions {
            shuffle_questions: self.session.shuffle_questions(),
        };
        let mut session = Session::new();
        match result {
            Ok(set) => {
                info!(category = %ticket.category, questions = set.questions.len(), "questions ready");
                self.loaded = set.questions;
                self.failed_categories = set.failed_categories;
                self.load_error = None;
                session.load(self.loaded.clone(), options, &mut *self.permuter);
            }
            Err(err) => {
                warn!(category = %ticket.category, error = %err, "load failed");
                self.loaded.clear();
                self.failed_categories.clear();
                self.load_error = Some(err.to_string());
                session.load(Vec::new(), options, &mut *self.permuter);
            }
        }
        self.session = session;
        self.reset_view();
        true
    }

    /// Ask for the category after the current one, wrapping around.
    pub fn next_category(&mut self) -> Option<LoadTicket> {
        if self.categories.len() < 2 || self.session.is_started() {
            return None;
        }
        let position = self
            .categories
            .iter()
            .position(|category| *category == self.category)
            .unwrap_or(0);
        let next = self.categories[(position + 1) % self.categories.len()].clone();
        Some(self.request_load(next))
    }

    /// Fetch the current category again.
    pub fn retry_load(&mut self) -> LoadTicket {
        self.request_load(self.category.clone())
    }

    pub fn start(&mut self) {
        if self.session.total_questions() == 0 {
            return;
        }
        self.dispatch(Action::Start);
        self.reset_view();
    }

    pub fn move_cursor_down(&mut self) {
        let choices = self.choice_count();
        if choices > 0 {
            self.cursor = (self.cursor + 1) % choices;
        }
    }

    pub fn move_cursor_up(&mut self) {
        let choices = self.choice_count();
        if choices > 0 {
            self.cursor = (self.cursor + choices - 1) % choices;
        }
    }

    pub fn select_at_cursor(&mut self) {
        self.dispatch(Action::Select(self.cursor));
    }

    /// Lock the current answer. With answers hidden, also move on.
    pub fn submit_current(&mut self) {
        if self.session.is_current_answered() || !self.session.current_selection().is_complete() {
            return;
        }
        self.dispatch(Action::SubmitAnswer);
        if !self.show_correct_answers {
            self.next();
        }
    }

    /// Enter on the quiz screen: pick single answers, then submit or advance.
    pub fn confirm(&mut self) {
        if self.session.is_current_answered() {
            self.next();
            return;
        }
        let single = self
            .session
            .current_question()
            .is_some_and(|question| !question.is_multi_answer());
        if single && !self.session.current_selection().contains(self.cursor) {
            self.select_at_cursor();
        }
        self.submit_current();
    }

    pub fn next(&mut self) {
        if !self.session.can_go_next() {
            return;
        }
        self.dispatch(Action::NextQuestion);
        self.cursor = 0;
    }

    pub fn previous(&mut self) {
        if !self.session.can_go_previous() {
            return;
        }
        self.dispatch(Action::PreviousQuestion);
        self.cursor = 0;
    }

    pub fn submit_quiz(&mut self) {
        self.dispatch(Action::SubmitQuiz);
        self.reset_view();
    }

    pub fn retake(&mut self) {
        self.dispatch(Action::Reset);
        self.reset_view();
    }

    /// Flip question shuffling. Before the quiz starts the loaded questions
    /// are reapplied so the new order shows up right away.
    pub fn toggle_question_shuffle(&mut self) {
        self.dispatch(Action::ToggleQuestionShuffle);
        if !self.session.is_started() {
            let options = LoadOptions {
                shuffle_questions: self.session.shuffle_questions(),
            };
            self.dispatch(Action::Load {
                questions: self.loaded.clone(),
                options,
            });
        }
    }

    pub fn shuffle_choices(&mut self) {
        self.dispatch(Action::ShuffleChoices);
        self.cursor = 0;
    }

    pub fn toggle_show_correct_answers(&mut self) {
        self.show_correct_answers = !self.show_correct_answers;
    }

    pub fn toggle_review(&mut self) {
        if self.session.is_completed() {
            self.reviewing = !self.reviewing;
            self.result_scroll = 0;
        }
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self.session.total_questions().saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    fn choice_count(&self) -> usize {
        self.session
            .current_question()
            .map_or(0, |question| question.choices.len())
    }

    fn dispatch(&mut self, action: Action) {
        let mut env = Env::new(Utc::now(), &mut *self.permuter);
        self.session.apply(action, &mut env);
    }

    fn reset_view(&mut self) {
        self.cursor = 0;
        self.reviewing = false;
        self.result_scroll = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SourceError;
    use crate::models::fixtures::{multi, single};
    use crate::session::Permutation;

    fn app() -> App {
        App::with_permuter(&QuizConfig::default(), Box::new(Permutation::reversed))
    }

    fn question_set() -> QuestionSet {
        QuestionSet {
            questions: vec![
                single(1, &["a", "b"], 0),
                single(2, &["a", "b"], 1),
                multi(3, &["a", "b", "c"], &[0, 1]),
            ],
            failed_categories: vec!["broken".to_string()],
        }
    }

    fn loaded_app() -> App {
        let mut app = app();
        let ticket = app.request_load(Category::All);
        assert!(app.finish_load(ticket, Ok(question_set())));
        app
    }

    #[test]
    fn test_loading_screen_until_result() {
        let mut app = app();
        let ticket = app.request_load(Category::All);
        assert_eq!(app.screen(), Screen::Loading);
        app.finish_load(ticket, Ok(question_set()));
        assert_eq!(app.screen(), Screen::Welcome);
        assert_eq!(app.session().total_questions(), 3);
        assert_eq!(app.failed_categories(), ["broken".to_string()]);
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut app = app();
        let old = app.request_load(Category::Named("old".into()));
        let new = app.request_load(Category::Named("new".into()));

        assert!(!app.finish_load(old, Ok(question_set())));
        assert!(app.is_loading());
        assert_eq!(app.session().total_questions(), 0);

        assert!(app.finish_load(new, Ok(QuestionSet::default())));
        assert_eq!(app.category(), &Category::Named("new".into()));
        assert!(!app.is_loading());
    }

    #[test]
    fn test_failed_load_shows_error() {
        let mut app = app();
        let ticket = app.request_load(Category::Named("rust".into()));
        let err = LoadError::SourceUnavailable {
            category: ticket.category.clone(),
            source: SourceError::Other("missing".into()),
        };
        app.finish_load(ticket, Err(err));
        assert_eq!(app.screen(), Screen::LoadFailed);
        assert!(app.load_error().unwrap().contains("rust"));
        assert_eq!(app.session().total_questions(), 0);

        let retry = app.retry_load();
        assert_eq!(retry.category, Category::Named("rust".into()));
        assert_eq!(app.screen(), Screen::Loading);
    }

    #[test]
    fn test_toggle_shuffle_reloads_before_start() {
        let mut app = loaded_app();
        app.toggle_question_shuffle();
        let ids: Vec<u64> = app.session().questions().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        app.toggle_question_shuffle();
        let ids: Vec<u64> = app.session().questions().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_confirm_selects_submits_then_advances() {
        let mut app = loaded_app();
        app.start();
        assert_eq!(app.screen(), Screen::Quiz);

        app.confirm();
        assert!(app.session().is_current_answered());
        assert_eq!(app.session().current_index(), 0);

        app.confirm();
        assert_eq!(app.session().current_index(), 1);
    }

    #[test]
    fn test_hidden_answers_auto_advance() {
        let mut app = loaded_app();
        app.toggle_show_correct_answers();
        app.start();
        app.confirm();
        assert_eq!(app.session().current_index(), 1);
    }

    #[test]
    fn test_multi_answer_needs_explicit_picks() {
        let mut app = loaded_app();
        app.start();
        app.confirm();
        app.confirm();
        app.move_cursor_down();
        app.confirm();
        app.confirm();
        assert_eq!(app.session().current_index(), 2);

        app.confirm();
        assert!(!app.session().is_current_answered());

        app.select_at_cursor();
        app.move_cursor_down();
        app.select_at_cursor();
        app.confirm();
        assert!(app.session().is_current_answered());

        app.confirm();
        assert_eq!(app.screen(), Screen::Results);
        assert_eq!(app.session().result(), Some((3, 3)));
    }

    #[test]
    fn test_review_and_retake() {
        let mut app = loaded_app();
        app.start();
        app.submit_quiz();
        assert_eq!(app.screen(), Screen::Results);
        app.toggle_review();
        assert_eq!(app.screen(), Screen::Review);
        app.scroll_results_down();
        app.scroll_results_down();
        app.scroll_results_down();
        assert_eq!(app.result_scroll(), 2);

        app.retake();
        assert_eq!(app.screen(), Screen::Welcome);
        assert_eq!(app.result_scroll(), 0);
    }

    #[test]
    fn test_category_cycling() {
        let mut app = loaded_app();
        app.set_categories(vec!["rust".into(), "git".into()]);
        let ticket = app.next_category().unwrap();
        assert_eq!(ticket.category, Category::Named("rust".into()));
        app.finish_load(ticket, Ok(question_set()));
        let ticket = app.next_category().unwrap();
        assert_eq!(ticket.category, Category::Named("git".into()));
        app.finish_load(ticket, Ok(question_set()));
        assert_eq!(app.next_category().unwrap().category, Category::All);
    }

    #[test]
    fn test_cursor_wraps() {
        let mut app = loaded_app();
        app.start();
        app.move_cursor_up();
        assert_eq!(app.cursor(), 1);
        app.move_cursor_down();
        assert_eq!(app.cursor(), 0);
    }
}
