//! Read-only projections of a session for rendering.

use chrono::{DateTime, Duration, Utc};

use crate::models::{Question, Selection};

use super::scoring;
use super::state::Session;

/// How a single choice should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceMark {
    /// Nothing special.
    Plain,
    /// Picked, correctness not shown.
    Selected,
    /// Correct choice on a locked question, picked or not.
    Correct { picked: bool },
    /// Picked on a locked question but wrong.
    Incorrect,
}

/// Marks for every choice of `question`.
///
/// Correctness is only revealed once the question is locked and
/// `reveal` is set.
pub fn choice_marks(
    question: &Question,
    selection: &Selection,
    locked: bool,
    reveal: bool,
) -> Vec<ChoiceMark> {
    (0..question.choices.len())
        .map(|index| {
            let picked = selection.contains(index);
            let correct = question.answer.contains(index);
            match (locked && reveal, correct, picked) {
                (true, true, _) => ChoiceMark::Correct { picked },
                (true, false, true) => ChoiceMark::Incorrect,
                (false, _, true) => ChoiceMark::Selected,
                _ => ChoiceMark::Plain,
            }
        })
        .collect()
}

/// Outcome of one question after the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionReview<'a> {
    pub index: usize,
    pub question: &'a Question,
    pub selection: &'a Selection,
    pub correct: bool,
}

/// Side-panel numbers for an in-progress quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStats {
    pub remaining: usize,
    pub elapsed: Option<Duration>,
    pub category: Option<String>,
    pub progress: u8,
}

/// Everything a front end needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizView<'a> {
    pub question: Option<&'a Question>,
    pub question_number: usize,
    pub total: usize,
    pub selection: &'a Selection,
    pub marks: Vec<ChoiceMark>,
    pub progress: u8,
    pub can_go_next: bool,
    pub can_go_previous: bool,
    pub is_last_question: bool,
    pub is_locked: bool,
    pub result: Option<(usize, usize)>,
}

impl Session {
    /// Snapshot of the current question and navigation state.
    pub fn view(&self, reveal_answers: bool) -> QuizView<'_> {
        let question = self.current_question();
        let selection = self.current_selection();
        let is_locked = self.is_current_answered();
        let marks = question
            .map(|q| choice_marks(q, selection, is_locked, reveal_answers))
            .unwrap_or_default();

        QuizView {
            question,
            question_number: self.current_index() + 1,
            total: self.total_questions(),
            selection,
            marks,
            progress: self.progress(),
            can_go_next: self.can_go_next(),
            can_go_previous: self.can_go_previous(),
            is_last_question: self.is_last_question(),
            is_locked,
            result: self.result(),
        }
    }

    /// Per-question breakdown, in presentation order.
    pub fn review(&self) -> Vec<QuestionReview<'_>> {
        self.questions()
            .iter()
            .zip(self.selections())
            .enumerate()
            .map(|(index, (question, selection))| QuestionReview {
                index,
                question,
                selection,
                correct: scoring::is_correct(question, selection),
            })
            .collect()
    }

    pub fn stats(&self, now: DateTime<Utc>) -> SessionStats {
        SessionStats {
            remaining: self.remaining(),
            elapsed: self.elapsed(now),
            category: self.current_question().map(|q| q.category.clone()),
            progress: self.progress(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::models::fixtures::{multi, single};
    use crate::session::LoadOptions;
    use crate::session::shuffle::Permutation;

    #[test]
    fn test_marks_hidden_until_locked() {
        let question = single(1, &["a", "b", "c"], 2);
        let marks = choice_marks(&question, &Selection::Single(0), false, true);
        assert_eq!(marks, vec![ChoiceMark::Selected, ChoiceMark::Plain, ChoiceMark::Plain]);
    }

    #[test]
    fn test_marks_reveal_on_locked_question() {
        let question = multi(1, &["a", "b", "c"], &[0, 2]);
        let selection = Selection::Multiple(BTreeSet::from([0, 1]));
        let marks = choice_marks(&question, &selection, true, true);
        assert_eq!(
            marks,
            vec![
                ChoiceMark::Correct { picked: true },
                ChoiceMark::Incorrect,
                ChoiceMark::Correct { picked: false },
            ]
        );
    }

    #[test]
    fn test_marks_without_reveal_keep_pick_when_locked() {
        let question = single(1, &["a", "b"], 1);
        let marks = choice_marks(&question, &Selection::Single(0), true, false);
        assert_eq!(marks, vec![ChoiceMark::Selected, ChoiceMark::Plain]);
    }

    #[test]
    fn test_hidden_view_keeps_pick_on_question_left_behind() {
        let mut session = Session::new();
        session.load(
            vec![single(1, &["a", "b"], 0), single(2, &["a", "b"], 1)],
            LoadOptions::default(),
            &mut Permutation::identity,
        );
        let now = Utc::now();
        session.start(now);
        session.select(0);
        session.submit_answer();
        session.next_question(now);
        session.select(1);
        session.submit_answer();

        session.previous_question();
        session.next_question(now);

        let view = session.view(false);
        assert!(view.is_locked);
        assert_eq!(view.marks, vec![ChoiceMark::Plain, ChoiceMark::Selected]);
    }

    #[test]
    fn test_review_and_view() {
        let mut session = Session::new();
        session.load(
            vec![single(1, &["a", "b"], 0), single(2, &["a", "b"], 1)],
            LoadOptions::default(),
            &mut Permutation::identity,
        );
        let start = Utc::now();
        session.start(start);
        session.select(0);
        session.submit_answer();

        let view = session.view(true);
        assert_eq!(view.question_number, 1);
        assert!(view.is_locked);
        assert!(view.can_go_next);
        assert_eq!(view.marks[0], ChoiceMark::Correct { picked: true });

        let stats = session.stats(start + Duration::seconds(5));
        assert_eq!(stats.remaining, 1);
        assert_eq!(stats.elapsed, Some(Duration::seconds(5)));
        assert_eq!(stats.category.as_deref(), Some("general"));

        session.next_question(start);
        session.select(0);
        session.submit_quiz(start);

        let review = session.review();
        assert_eq!(review.len(), 2);
        assert!(review[0].correct);
        assert!(!review[1].correct);
        assert_eq!(session.view(true).result, Some((1, 2)));
    }
}
