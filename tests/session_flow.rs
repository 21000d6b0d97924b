use std::collections::BTreeSet;

use category_quiz::session::{Action, Env, LoadOptions, Permutation, RandomPermuter, Session};
use category_quiz::{Answer, Question, QuestionKind, Selection};
use chrono::{Duration, Utc};

fn question(id: u64, choices: &[&str], answer: Answer) -> Question {
    let kind = match answer {
        Answer::Single(_) => QuestionKind::MultipleChoice,
        Answer::Multiple(_) => QuestionKind::MultipleAnswer,
    };
    Question {
        id,
        prompt: format!("Question {id}"),
        choices: choices.iter().map(|c| c.to_string()).collect(),
        answer,
        kind,
        category: "flow".to_string(),
        image: None,
    }
}

fn loaded(questions: Vec<Question>) -> Session {
    let mut session = Session::new();
    session.load(questions, LoadOptions::default(), &mut Permutation::identity);
    session
}

#[test]
fn test_submit_early_after_one_correct_answer() {
    let mut session = loaded(vec![
        question(1, &["a", "b"], Answer::Single(0)),
        question(2, &["a", "b"], Answer::Single(1)),
    ]);
    let now = Utc::now();

    session.start(now);
    session.select(0);
    session.submit_answer();
    session.next_question(now);
    session.select(0);
    session.submit_quiz(now + Duration::seconds(12));

    assert_eq!(session.result(), Some((1, 2)));
    assert_eq!(session.elapsed(Utc::now()), Some(Duration::seconds(12)));
}

#[test]
fn test_overrun_completes_without_moving_pointer() {
    let mut session = loaded(vec![
        question(1, &["a", "b"], Answer::Single(0)),
        question(2, &["a", "b"], Answer::Single(0)),
        question(3, &["a", "b", "c"], Answer::Multiple(vec![0, 1, 2])),
    ]);
    let now = Utc::now();
    session.start(now);
    session.next_question(now);
    session.next_question(now);
    for choice in [2, 0, 1] {
        session.select(choice);
    }
    session.next_question(now);

    assert!(session.is_completed());
    assert_eq!(session.current_index(), 2);
    assert_eq!(session.result(), Some((1, 3)));
}

#[test]
fn test_reanswer_after_going_back() {
    let mut session = loaded(vec![
        question(1, &["a", "b"], Answer::Single(1)),
        question(2, &["a", "b"], Answer::Single(1)),
    ]);
    let now = Utc::now();
    session.start(now);
    session.select(0);
    session.submit_answer();
    session.next_question(now);

    session.previous_question();
    assert!(!session.is_current_answered());
    assert_eq!(session.current_selection(), &Selection::Single(0));

    session.select(1);
    session.submit_answer();
    session.submit_quiz(now);
    assert_eq!(session.result(), Some((1, 2)));
}

#[test]
fn test_random_choice_shuffle_keeps_answers_pointing_at_same_text() {
    let originals = vec![
        question(1, &["A", "B", "C", "D"], Answer::Single(1)),
        question(2, &["w", "x", "y", "z", "v"], Answer::Multiple(vec![0, 3, 4])),
    ];
    let mut session = loaded(originals.clone());
    let mut permuter = RandomPermuter::seeded(17);

    for _ in 0..20 {
        session.shuffle_choices(&mut permuter);
        for (before, after) in originals.iter().zip(session.questions()) {
            let correct_before: BTreeSet<&String> = before
                .choices
                .iter()
                .enumerate()
                .filter(|(i, _)| before.answer.contains(*i))
                .map(|(_, c)| c)
                .collect();
            let correct_after: BTreeSet<&String> = after
                .choices
                .iter()
                .enumerate()
                .filter(|(i, _)| after.answer.contains(*i))
                .map(|(_, c)| c)
                .collect();
            assert_eq!(correct_before, correct_after);
        }
    }
}

#[test]
fn test_reduce_drives_full_session() {
    let mut permuter = Permutation::reversed;
    let mut env = Env::new(Utc::now(), &mut permuter);

    let session = Session::new()
        .reduce(
            Action::Load {
                questions: vec![
                    question(1, &["A", "B", "C"], Answer::Single(0)),
                    question(2, &["A", "B"], Answer::Single(1)),
                ],
                options: LoadOptions { shuffle_questions: true },
            },
            &mut env,
        )
        .reduce(Action::ShuffleChoices, &mut env)
        .reduce(Action::Start, &mut env);

    assert_eq!(session.questions()[0].id, 2);
    assert_eq!(session.questions()[0].choices, vec!["B", "A"]);
    assert_eq!(session.questions()[0].answer, Answer::Single(0));

    let session = session
        .reduce(Action::Select(0), &mut env)
        .reduce(Action::SubmitAnswer, &mut env)
        .reduce(Action::NextQuestion, &mut env)
        .reduce(Action::Select(2), &mut env)
        .reduce(Action::NextQuestion, &mut env);

    assert_eq!(session.result(), Some((2, 2)));

    let session = session.reduce(Action::Reset, &mut env);
    assert!(!session.is_started());
    assert_eq!(session.questions()[0].choices, vec!["A", "B"]);
}
