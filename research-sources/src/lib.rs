//! # research-sources
//!
//! Encyclopedia and web search lookups for the research assistant.
//!
//! Both integrations talk to public endpoints directly — no API keys, no
//! account setup. Wikipedia is reached through the MediaWiki action API and
//! DuckDuckGo through its HTML-only results page.
//!
//! ## Design
//!
//! - Every lookup returns a [`LookupOutcome`]; failures are values, never
//!   propagated errors
//! - One HTTP request sequence per lookup, no caching and no retries
//! - Topics are logged only at trace level

pub mod config;
pub mod error;
pub mod http;
pub mod source;
pub mod sources;
pub mod types;

pub use config::LookupConfig;
pub use error::{LookupError, Result};
pub use source::LookupSource;
pub use sources::{DuckDuckGoSource, WikipediaSource};
pub use types::{LookupOutcome, SearchResult, Tool};

/// Look up `topic` on Wikipedia.
///
/// # Examples
///
/// ```no_run
/// # async fn example() {
/// let config = research_sources::LookupConfig::default();
/// let outcome = research_sources::wiki_lookup("Rust (programming language)", &config).await;
/// println!("{:?}", outcome.sources());
/// # }
/// ```
pub async fn wiki_lookup(topic: &str, config: &LookupConfig) -> LookupOutcome {
    if let Err(err) = config.validate() {
        return LookupOutcome::Failed(err.to_string());
    }
    WikipediaSource.lookup(topic, config).await
}

/// Search DuckDuckGo for `topic`, keeping up to `config.max_results` hits.
///
/// # Examples
///
/// ```no_run
/// # async fn example() {
/// let config = research_sources::LookupConfig::default();
/// let outcome = research_sources::web_search("rust programming", &config).await;
/// for url in outcome.sources() {
///     println!("{url}");
/// }
/// # }
/// ```
pub async fn web_search(topic: &str, config: &LookupConfig) -> LookupOutcome {
    if let Err(err) = config.validate() {
        return LookupOutcome::Failed(err.to_string());
    }
    DuckDuckGoSource.lookup(topic, config).await
}
