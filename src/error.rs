//! Error types for the research assistant.
//!
//! Lookup failures never appear here: they are folded into the record text
//! by the aggregator. What remains are the faults that stop a submission.

/// Top-level error type for the research assistant.
#[derive(Debug, thiserror::Error)]
pub enum ResearchError {
    /// Reading or appending the research log failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// The HTTP front end could not start or stopped unexpectedly.
    #[error("server error: {0}")]
    Server(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ResearchError>;
