use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UniteError {
    #[error("archive directory pattern error: {pattern}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to list archive {path}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decompress {path}: {source}")]
    Decompress {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<glob::GlobError> for UniteError {
    fn from(err: glob::GlobError) -> Self {
        Self::List {
            path: err.path().to_path_buf(),
            source: err.into_error(),
        }
    }
}
