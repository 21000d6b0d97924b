use chrono::{DateTime, Utc};

use crate::models::Question;

use super::shuffle::Permuter;
use super::state::{LoadOptions, Session};

/// Everything that can happen to a session.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Load {
        questions: Vec<Question>,
        options: LoadOptions,
    },
    Start,
    Select(usize),
    SubmitAnswer,
    NextQuestion,
    PreviousQuestion,
    Reset,
    SubmitQuiz,
    ToggleQuestionShuffle,
    ShuffleChoices,
}

/// Side inputs a transition may need: the current time and a source of
/// permutations.
pub struct Env<'a> {
    pub now: DateTime<Utc>,
    pub permuter: &'a mut dyn Permuter,
}

impl<'a> Env<'a> {
    pub fn new(now: DateTime<Utc>, permuter: &'a mut dyn Permuter) -> Self {
        Self { now, permuter }
    }
}

impl Session {
    /// Apply `action` and return the resulting session.
    pub fn reduce(mut self, action: Action, env: &mut Env<'_>) -> Session {
        self.apply(action, env);
        self
    }

    /// In-place form of [`Session::reduce`].
    pub fn apply(&mut self, action: Action, env: &mut Env<'_>) {
        match action {
            Action::Load { questions, options } => self.load(questions, options, &mut *env.permuter),
            Action::Start => self.start(env.now),
            Action::Select(choice) => self.select(choice),
            Action::SubmitAnswer => self.submit_answer(),
            Action::NextQuestion => self.next_question(env.now),
            Action::PreviousQuestion => self.previous_question(),
            Action::Reset => self.reset(&mut *env.permuter),
            Action::SubmitQuiz => self.submit_quiz(env.now),
            Action::ToggleQuestionShuffle => self.toggle_question_shuffle(),
            Action::ShuffleChoices => self.shuffle_choices(&mut *env.permuter),
        }
    }
}
