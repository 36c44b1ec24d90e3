//! Lookup configuration with sensible defaults.
//!
//! [`LookupConfig`] controls result counts, timeouts, endpoints and request
//! headers for both the encyclopedia and the web search lookups.

use crate::error::LookupError;
use serde::{Deserialize, Serialize};

/// Default MediaWiki host queried for encyclopedia summaries.
pub const DEFAULT_WIKIPEDIA_BASE_URL: &str = "https://en.wikipedia.org";

/// User-Agent sent to the MediaWiki API unless overridden.
pub const DEFAULT_WIKIPEDIA_USER_AGENT: &str =
    concat!("research-assistant/", env!("CARGO_PKG_VERSION"), " (research-sources; reqwest)");

/// Default DuckDuckGo HTML-only search endpoint.
pub const DEFAULT_DUCKDUCKGO_URL: &str = "https://html.duckduckgo.com/html/";

/// Configuration shared by every lookup.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides (tests point the endpoints at a local mock server).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Maximum number of web search results to keep.
    pub max_results: usize,
    /// Number of sentences requested for the encyclopedia summary.
    pub sentences: u32,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Whether to request safe search filtering from DuckDuckGo.
    pub safe_search: bool,
    /// Custom User-Agent for the web search client. If `None`, rotates
    /// through a built-in list of browser User-Agents.
    pub user_agent: Option<String>,
    /// User-Agent for the MediaWiki API. Wikimedia asks API clients to name
    /// themselves; deployments should append a contact address.
    pub wikipedia_user_agent: String,
    /// Scheme and host of the MediaWiki installation, without a trailing path.
    pub wikipedia_base_url: String,
    /// Full URL of the DuckDuckGo HTML search endpoint.
    pub duckduckgo_url: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            max_results: 3,
            sentences: 3,
            timeout_seconds: 8,
            safe_search: false,
            user_agent: None,
            wikipedia_user_agent: DEFAULT_WIKIPEDIA_USER_AGENT.to_owned(),
            wikipedia_base_url: DEFAULT_WIKIPEDIA_BASE_URL.to_owned(),
            duckduckgo_url: DEFAULT_DUCKDUCKGO_URL.to_owned(),
        }
    }
}

impl LookupConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `max_results` must be greater than 0
    /// - `sentences` must be greater than 0
    /// - `timeout_seconds` must be greater than 0
    /// - `wikipedia_user_agent` must not be blank
    /// - both endpoints must be absolute `http(s)` URLs
    pub fn validate(&self) -> Result<(), LookupError> {
        if self.max_results == 0 {
            return Err(LookupError::Config(
                "max_results must be greater than 0".into(),
            ));
        }
        if self.sentences == 0 {
            return Err(LookupError::Config(
                "sentences must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(LookupError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.wikipedia_user_agent.trim().is_empty() {
            return Err(LookupError::Config(
                "wikipedia_user_agent must not be empty".into(),
            ));
        }
        for (name, value) in [
            ("wikipedia_base_url", &self.wikipedia_base_url),
            ("duckduckgo_url", &self.duckduckgo_url),
        ] {
            let parsed = url::Url::parse(value)
                .map_err(|e| LookupError::Config(format!("{name} is not a valid URL: {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(LookupError::Config(format!(
                    "{name} must use http or https"
                )));
            }
        }
        Ok(())
    }

    /// MediaWiki action API endpoint derived from `wikipedia_base_url`.
    pub fn wikipedia_api_url(&self) -> String {
        format!("{}/w/api.php", self.wikipedia_base_url.trim_end_matches('/'))
    }
}
