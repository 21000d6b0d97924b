mod question;
mod selection;

pub use question::{Answer, Question, QuestionError, QuestionKind};
pub use selection::Selection;

#[cfg(test)]
pub(crate) use question::fixtures;
