use std::collections::HashSet;

use futures_util::future::join_all;
use tracing::{error, info, warn};

use crate::models::Question;

use super::error::LoadError;
use super::source::{Category, QuestionSource};

/// Questions gathered for one category selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionSet {
    pub questions: Vec<Question>,
    /// Categories skipped because their file could not be loaded.
    pub failed_categories: Vec<String>,
}

/// Load the questions for `category`.
///
/// For [`Category::All`] every listed category is fetched and the results
/// are concatenated in list order; a category that fails is logged and
/// skipped. A named category that fails, or a category list that cannot
/// be read, fails the whole load.
pub async fn load_questions(
    source: &dyn QuestionSource,
    category: &Category,
) -> Result<QuestionSet, LoadError> {
    let unavailable = |source| LoadError::SourceUnavailable {
        category: category.clone(),
        source,
    };

    let set = match category {
        Category::Named(name) => {
            let questions = source.fetch_category(name).await.map_err(|err| {
                error!(category = %name, error = %err, "failed to load category");
                unavailable(err)
            })?;
            QuestionSet {
                questions: keep_valid(name, questions),
                failed_categories: Vec::new(),
            }
        }
        Category::All => {
            let names = source.fetch_category_list().await.map_err(|err| {
                error!(error = %err, "failed to load category list");
                unavailable(err)
            })?;
            aggregate(source, names).await
        }
    };

    warn_duplicate_ids(&set.questions);
    info!(
        category = %category,
        questions = set.questions.len(),
        failed = set.failed_categories.len(),
        "question set loaded"
    );
    Ok(set)
}

async fn aggregate(source: &dyn QuestionSource, names: Vec<String>) -> QuestionSet {
    let results = join_all(names.iter().map(|name| source.fetch_category(name))).await;

    let mut set = QuestionSet::default();
    for (name, result) in names.into_iter().zip(results) {
        match result {
            Ok(questions) => set.questions.extend(keep_valid(&name, questions)),
            Err(err) => {
                warn!(category = %name, error = %err, "skipping category that failed to load");
                set.failed_categories.push(name);
            }
        }
    }
    set
}

fn keep_valid(category: &str, questions: Vec<Question>) -> Vec<Question> {
    questions
        .into_iter()
        .filter(|question| match question.validate() {
            Ok(()) => true,
            Err(err) => {
                warn!(category, error = %err, "skipping malformed question");
                false
            }
        })
        .collect()
}

fn warn_duplicate_ids(questions: &[Question]) {
    let mut seen = HashSet::with_capacity(questions.len());
    for question in questions {
        if !seen.insert(question.id) {
            warn!(id = question.id, "duplicate question id in loaded set");
        }
    }
}
