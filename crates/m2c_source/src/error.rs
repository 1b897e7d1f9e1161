//! Errors raised while loading a source file

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A source file could not be loaded
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("file not found: {0:?}")]
    FileNotFound(PathBuf),
    #[error("access denied: {0:?}")]
    FileAccessDenied(PathBuf),
    #[error("file is empty: {0:?}")]
    EmptyFile(PathBuf),
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
