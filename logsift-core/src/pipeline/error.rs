use crate::stream::{SinkError, StreamError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("failed to start the lookup runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("sink columns {found:?} do not match pipeline columns {expected:?}")]
    ColumnMismatch {
        expected: Vec<&'static str>,
        found: Vec<&'static str>,
    },
}
