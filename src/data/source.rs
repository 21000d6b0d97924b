use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::models::Question;

use super::error::SourceError;

const CATEGORY_LIST_FILE: &str = "categories.json";
const ALL_CATEGORIES: &str = "All";

/// Which questions to load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Category {
    /// Every category the source knows about.
    #[default]
    All,
    Named(String),
}

impl Category {
    /// `None`, an empty name and the literal `All` all select every category.
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector.map(str::trim) {
            None | Some("") | Some(ALL_CATEGORIES) => Self::All,
            Some(name) => Self::Named(name.to_string()),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Named(name) => Some(name),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All Categories"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Where questions come from.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Names of every known category, in presentation order.
    async fn fetch_category_list(&self) -> Result<Vec<String>, SourceError>;

    /// All questions of a single category.
    async fn fetch_category(&self, name: &str) -> Result<Vec<Question>, SourceError>;
}

/// Reads `categories.json` and `<name>.json` files from a directory.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, file: &str) -> Result<T, SourceError> {
        let path = self.root.join(file);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SourceError::Io {
                path: path.clone(),
                source,
            })?;
        serde_json::from_str(&content).map_err(|source| SourceError::Parse { path, source })
    }
}

#[async_trait]
impl QuestionSource for FileSource {
    async fn fetch_category_list(&self) -> Result<Vec<String>, SourceError> {
        self.read_json(CATEGORY_LIST_FILE).await
    }

    /// Records that do not parse as a question are skipped, the rest of
    /// the file still loads.
    async fn fetch_category(&self, name: &str) -> Result<Vec<Question>, SourceError> {
        let records: Vec<Value> = self.read_json(&format!("{name}.json")).await?;
        let questions = records
            .into_iter()
            .enumerate()
            .filter_map(|(position, record)| match serde_json::from_value(record) {
                Ok(question) => Some(question),
                Err(err) => {
                    warn!(category = name, position, error = %err, "skipping unreadable question");
                    None
                }
            })
            .collect();
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_selector() {
        assert_eq!(Category::from_selector(None), Category::All);
        assert_eq!(Category::from_selector(Some("All")), Category::All);
        assert_eq!(Category::from_selector(Some("  ")), Category::All);
        assert_eq!(
            Category::from_selector(Some("rust")),
            Category::Named("rust".to_string())
        );
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::All.to_string(), "All Categories");
        assert_eq!(Category::Named("git".into()).to_string(), "git");
        assert_eq!(Category::Named("git".into()).name(), Some("git"));
    }
}
