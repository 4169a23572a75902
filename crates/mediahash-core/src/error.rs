//! Errors for the hashing engine.

use thiserror::Error;

/// Failures while computing identifiers or dispatching work.
#[derive(Error, Debug)]
pub enum HashError {
    /// I/O failure reading the file or stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A kept algorithm has no streaming hasher. The whole task fails;
    /// no partial digest set is ever returned.
    #[error("no hasher available for algorithm '{0}'")]
    Unsupported(String),

    /// A worker task died before producing a result.
    #[error("worker task failed: {0}")]
    Worker(String),

    /// The pool was configured with zero workers.
    #[error("worker pool requires at least one worker")]
    NoWorkers,
}
