use std::path::PathBuf;

use crate::data::Category;

pub const DEFAULT_DATA_DIR: &str = "quiz-data";

/// Runtime settings for a quiz run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    /// Directory holding `categories.json` and the category files.
    pub data_dir: PathBuf,
    pub category: Category,
    /// Initial question-shuffle preference.
    pub shuffle_questions: bool,
    /// Reveal correct answers after each submitted question.
    pub show_correct_answers: bool,
    /// Where log output goes. Logging is off without one.
    pub log_file: Option<PathBuf>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            category: Category::All,
            shuffle_questions: false,
            show_correct_answers: true,
            log_file: None,
        }
    }
}
