use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::source::Category;

/// Failure to read one file from a question source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Other(String),
}

/// Failure to produce a question set at all.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("questions for {category} are unavailable")]
    SourceUnavailable {
        category: Category,
        #[source]
        source: SourceError,
    },
}
