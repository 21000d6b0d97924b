//! Scoring rules.
//!
//! Shape mismatches between a selection, a question's type and its answer
//! never fail; they simply count as incorrect.

use std::collections::BTreeSet;

use crate::models::{Answer, Question, Selection};

/// Whether `selection` answers `question` correctly.
///
/// Multi-answer questions need an exact set match. There is no partial
/// credit.
pub fn is_correct(question: &Question, selection: &Selection) -> bool {
    if question.kind.is_multi_answer() {
        let (Selection::Multiple(picked), Answer::Multiple(expected)) = (selection, &question.answer)
        else {
            return false;
        };
        let expected: BTreeSet<usize> = expected.iter().copied().collect();
        *picked == expected
    } else {
        matches!(
            (selection, &question.answer),
            (Selection::Single(picked), Answer::Single(expected)) if picked == expected
        )
    }
}

/// Number of correctly answered questions.
///
/// Selections and questions are paired by index; extra entries on either
/// side are ignored.
pub fn score(selections: &[Selection], questions: &[Question]) -> usize {
    selections
        .iter()
        .zip(questions)
        .filter(|(selection, question)| is_correct(question, selection))
        .count()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::models::QuestionKind;
    use crate::models::fixtures::{multi, single};

    fn picked(indices: &[usize]) -> Selection {
        Selection::Multiple(indices.iter().copied().collect())
    }

    #[test]
    fn test_single_answer_scores_only_exact_index() {
        let question = single(1, &["a", "b", "c"], 1);
        assert!(is_correct(&question, &Selection::Single(1)));
        assert!(!is_correct(&question, &Selection::Single(0)));
        assert!(!is_correct(&question, &Selection::Unset));
        assert!(!is_correct(&question, &picked(&[1])));
    }

    #[test]
    fn test_multi_answer_is_order_independent() {
        let question = multi(1, &["a", "b", "c"], &[0, 1, 2]);
        assert!(is_correct(&question, &picked(&[2, 0, 1])));
    }

    #[test]
    fn test_multi_answer_duplicates_in_answer_are_ignored() {
        let question = multi(1, &["a", "b", "c"], &[2, 0, 2]);
        assert!(is_correct(&question, &picked(&[0, 2])));
    }

    #[test]
    fn test_multi_answer_has_no_partial_credit() {
        let question = multi(1, &["a", "b", "c", "d"], &[0, 1, 2]);
        assert!(!is_correct(&question, &picked(&[0, 1])));
        assert!(!is_correct(&question, &picked(&[0, 1, 2, 3])));
        assert!(!is_correct(&question, &picked(&[0, 1, 3])));
        assert!(!is_correct(&question, &Selection::Single(0)));
    }

    #[test]
    fn test_malformed_question_counts_as_wrong() {
        let mut question = single(1, &["a", "b"], 0);
        question.kind = QuestionKind::MultipleAnswer;
        assert!(!is_correct(&question, &picked(&[0])));
        assert!(!is_correct(&question, &Selection::Single(0)));
    }

    #[test]
    fn test_score_counts_correct_answers() {
        let questions = vec![
            single(1, &["a", "b"], 0),
            single(2, &["a", "b"], 1),
            multi(3, &["a", "b", "c"], &[0, 2]),
        ];
        let selections = vec![Selection::Single(0), Selection::Single(0), picked(&[2, 0])];
        assert_eq!(score(&selections, &questions), 2);
        assert_eq!(score(&[], &questions), 0);
    }

    proptest! {
        #[test]
        fn prop_multi_answer_matches_any_ordering(
            answer in proptest::collection::btree_set(0usize..6, 1..6)
        ) {
            let expected: Vec<usize> = answer.iter().rev().copied().collect();
            let question = multi(1, &["a", "b", "c", "d", "e", "f"], &expected);
            prop_assert!(is_correct(&question, &Selection::Multiple(answer.clone())));

            let mut fewer = answer.clone();
            let first = *fewer.iter().next().unwrap();
            fewer.remove(&first);
            prop_assert!(!is_correct(&question, &Selection::Multiple(fewer)));
        }
    }
}
