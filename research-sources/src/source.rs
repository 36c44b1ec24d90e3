//! Trait definition for pluggable lookup backends.
//!
//! Each integration (Wikipedia, DuckDuckGo) implements [`LookupSource`] to
//! provide a uniform interface for querying a topic.

use crate::config::LookupConfig;
use crate::types::{LookupOutcome, Tool};

/// A pluggable lookup backend.
///
/// Implementors own:
///
/// - URL construction with query encoding
/// - the HTTP request with appropriate headers
/// - response parsing
/// - folding every failure into [`LookupOutcome::Failed`] (or
///   [`LookupOutcome::AmbiguousTopic`] where that applies)
///
/// All implementations must be `Send + Sync` so a shared server state can
/// hold them.
pub trait LookupSource: Send + Sync {
    /// Look up `topic` and report what the service produced.
    ///
    /// The topic is used verbatim; implementations handle encoding.
    fn lookup(
        &self,
        topic: &str,
        config: &LookupConfig,
    ) -> impl std::future::Future<Output = LookupOutcome> + Send;

    /// Returns which [`Tool`] this implementation represents.
    fn tool(&self) -> Tool;
}
