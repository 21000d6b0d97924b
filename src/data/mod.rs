//! Question sources and the category aggregation built on top of them.

mod error;
mod loader;
mod source;

pub use error::{LoadError, SourceError};
pub use loader::{QuestionSet, load_questions};
pub use source::{Category, FileSource, QuestionSource};
