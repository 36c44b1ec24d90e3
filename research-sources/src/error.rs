//! Error types for the research-sources crate.
//!
//! These errors never leave a lookup as control flow: each lookup folds them
//! into [`crate::LookupOutcome::Failed`] before returning. The `Display`
//! strings are therefore what ends up in front of the user.

/// Errors that can occur while talking to an external information service.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// An HTTP request failed or returned an error status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The service responded with something we could not interpret.
    #[error("parse error: {0}")]
    Parse(String),

    /// The encyclopedia has no page for the requested topic.
    #[error("Page id \"{0}\" does not match any pages. Try another id!")]
    NotFound(String),

    /// Invalid lookup configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for research-sources results.
pub type Result<T> = std::result::Result<T, LookupError>;
