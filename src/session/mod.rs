//! Quiz session state machine.
//!
//! [`Session`] owns the question list, per-question selections, the locked
//! set and the timestamps. It can be driven through its methods or through
//! [`Action`]s with [`Session::reduce`].

mod action;
mod scoring;
mod shuffle;
mod state;
mod view;

pub use action::{Action, Env};
pub use scoring::{is_correct, score};
pub use shuffle::{Permutation, PermutationError, Permuter, RandomPermuter, permute_choices};
pub use state::{LoadOptions, Session, SessionStatus};
pub use view::{ChoiceMark, QuestionReview, QuizView, SessionStats, choice_marks};
