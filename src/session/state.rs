//! The quiz session aggregate.
//!
//! All transitions are synchronous and total: out-of-range movements are
//! clamped and actions that make no sense in the current state leave it
//! untouched.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{Question, Selection};

use super::scoring;
use super::shuffle::{Permuter, permute_choices};

/// Options carried by a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Present the questions in a random order.
    pub shuffle_questions: bool,
}

/// Coarse lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Not started yet, possibly without questions.
    Ready,
    /// Started and not completed.
    InProgress,
    /// Completed, score available.
    Completed,
}

/// A single user's pass through a question set.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    /// Questions in the order the source delivered them.
    source: Vec<Question>,
    questions: Vec<Question>,
    /// One entry per question, same indices.
    selections: Vec<Selection>,
    /// Locked question indices.
    answered: BTreeSet<usize>,
    current: usize,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    completed: bool,
    score: usize,
    shuffle_questions: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an empty session with no questions.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            source: Vec::new(),
            questions: Vec::new(),
            selections: Vec::new(),
            answered: BTreeSet::new(),
            current: 0,
            started_at: None,
            ended_at: None,
            completed: false,
            score: 0,
            shuffle_questions: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn current_selection(&self) -> &Selection {
        static UNSET: Selection = Selection::Unset;
        self.selections.get(self.current).unwrap_or(&UNSET)
    }

    pub fn is_answered(&self, index: usize) -> bool {
        self.answered.contains(&index)
    }

    pub fn is_current_answered(&self) -> bool {
        self.is_answered(self.current)
    }

    pub fn answered_count(&self) -> usize {
        self.answered.len()
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn status(&self) -> SessionStatus {
        if self.completed {
            SessionStatus::Completed
        } else if self.is_started() {
            SessionStatus::InProgress
        } else {
            SessionStatus::Ready
        }
    }

    /// Whether the next load or reset shuffles the question order.
    pub fn shuffle_questions(&self) -> bool {
        self.shuffle_questions
    }

    /// Final `(score, total)`, once completed.
    pub fn result(&self) -> Option<(usize, usize)> {
        self.completed.then_some((self.score, self.questions.len()))
    }

    /// Forward navigation needs a complete selection on the current question.
    pub fn can_go_next(&self) -> bool {
        !self.questions.is_empty() && self.current_selection().is_complete()
    }

    pub fn can_go_previous(&self) -> bool {
        self.current > 0
    }

    pub fn is_last_question(&self) -> bool {
        !self.questions.is_empty() && self.current == self.questions.len() - 1
    }

    /// `round(current / total * 100)`, or 0 without questions.
    pub fn progress(&self) -> u8 {
        if self.questions.is_empty() {
            return 0;
        }
        let ratio = self.current as f64 / self.questions.len() as f64;
        (ratio * 100.0).round().clamp(0.0, 100.0) as u8
    }

    /// Questions left after the current one.
    pub fn remaining(&self) -> usize {
        self.questions.len().saturating_sub(self.current + 1)
    }

    /// Time since start, up to the end timestamp once completed.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Option<Duration> {
        let start = self.started_at?;
        let end = self.ended_at.unwrap_or(now);
        Some((end - start).max(Duration::zero()))
    }

    /// Replace the question list.
    ///
    /// Selections are cleared; locked indices that no longer exist are
    /// dropped and the pointer is clamped to the new list.
    pub fn load<P: Permuter + ?Sized>(
        &mut self,
        questions: Vec<Question>,
        options: LoadOptions,
        permuter: &mut P,
    ) {
        self.shuffle_questions = options.shuffle_questions;
        self.source = questions;
        self.install(self.arranged(permuter));
        info!(
            session = %self.id,
            questions = self.questions.len(),
            shuffled = self.shuffle_questions,
            "questions loaded"
        );
    }

    pub fn start(&mut self, now: DateTime<Utc>) {
        self.started_at = Some(now);
        self.current = 0;
        debug!(session = %self.id, "session started");
    }

    /// Record a pick on the current question.
    ///
    /// Single-answer questions take `choice` as the selection; multi-answer
    /// questions toggle it. Locked questions and out-of-range choices are
    /// ignored.
    pub fn select(&mut self, choice: usize) {
        if self.completed || self.is_current_answered() {
            debug!(session = %self.id, index = self.current, "ignoring select on locked question");
            return;
        }
        let Some(question) = self.questions.get(self.current) else {
            return;
        };
        if choice >= question.choices.len() {
            debug!(session = %self.id, choice, "ignoring out-of-range choice");
            return;
        }
        let multi = question.is_multi_answer();
        let selection = &mut self.selections[self.current];
        if multi {
            selection.toggle(choice);
        } else {
            *selection = Selection::Single(choice);
        }
    }

    /// Lock the current question.
    pub fn submit_answer(&mut self) {
        if self.completed || self.questions.is_empty() {
            return;
        }
        self.answered.insert(self.current);
        debug!(session = %self.id, index = self.current, "answer submitted");
    }

    /// Advance, completing the session when moving past the last question.
    pub fn next_question(&mut self, now: DateTime<Utc>) {
        if self.completed {
            return;
        }
        let next = self.current + 1;
        if next >= self.questions.len() {
            self.complete(now);
        } else {
            self.current = next;
        }
    }

    /// Step back and reopen the question landed on for re-answering.
    ///
    /// Only the landed-on question is unlocked; its selection is kept.
    pub fn previous_question(&mut self) {
        if self.completed {
            return;
        }
        self.current = self.current.saturating_sub(1);
        self.answered.remove(&self.current);
    }

    /// Complete immediately, scoring whatever has been selected.
    pub fn submit_quiz(&mut self, now: DateTime<Utc>) {
        if self.completed {
            return;
        }
        self.complete(now);
    }

    /// Start over from the delivered questions, reshuffled when the
    /// question-shuffle preference is on.
    pub fn reset<P: Permuter + ?Sized>(&mut self, permuter: &mut P) {
        let questions = self.arranged(permuter);
        self.answered.clear();
        self.install(questions);
        self.current = 0;
        self.started_at = None;
        self.ended_at = None;
        self.completed = false;
        self.score = 0;
        debug!(session = %self.id, "session reset");
    }

    /// Flip the question-shuffle preference. The current order is kept.
    pub fn toggle_question_shuffle(&mut self) {
        self.shuffle_questions = !self.shuffle_questions;
        debug!(session = %self.id, shuffle = self.shuffle_questions, "question shuffle toggled");
    }

    /// Shuffle every question's choices independently.
    ///
    /// Old selections refer to the previous choice order, so they are
    /// cleared along with the locked set and the pointer.
    pub fn shuffle_choices<P: Permuter + ?Sized>(&mut self, permuter: &mut P) {
        self.questions = self
            .questions
            .iter()
            .map(|question| {
                let permutation = permuter.permutation(question.choices.len());
                permute_choices(question, &permutation)
            })
            .collect();
        self.selections = vec![Selection::Unset; self.questions.len()];
        self.answered.clear();
        self.current = 0;
        debug!(session = %self.id, "choices shuffled");
    }

    fn arranged<P: Permuter + ?Sized>(&self, permuter: &mut P) -> Vec<Question> {
        if !self.shuffle_questions {
            return self.source.clone();
        }
        let permutation = permuter.permutation(self.source.len());
        permutation
            .apply(&self.source)
            .unwrap_or_else(|| self.source.clone())
    }

    fn install(&mut self, questions: Vec<Question>) {
        let len = questions.len();
        self.questions = questions;
        self.selections = vec![Selection::Unset; len];
        self.answered.retain(|&index| index < len);
        self.current = self.current.min(len.saturating_sub(1));
    }

    fn complete(&mut self, now: DateTime<Utc>) {
        self.score = scoring::score(&self.selections, &self.questions);
        self.ended_at = Some(now);
        self.completed = true;
        info!(
            session = %self.id,
            score = self.score,
            total = self.questions.len(),
            "quiz completed"
        );
    }
}
