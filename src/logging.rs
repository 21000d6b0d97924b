//! Log setup. The terminal belongs to the UI, so events go to a file.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log file {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Install a global subscriber writing to `path`.
///
/// The filter defaults to `info` and honours `RUST_LOG`.
pub fn init(path: &Path) -> Result<(), LoggingError> {
    let file = File::create(path).map_err(|source| LoggingError::File {
        path: path.to_path_buf(),
        source,
    })?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .try_init()?;

    Ok(())
}
