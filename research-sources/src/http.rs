//! HTTP clients for the two lookup services.
//!
//! The MediaWiki API and the DuckDuckGo HTML endpoint want different things
//! from a client. Wikimedia asks API clients to name themselves, so the
//! encyclopedia client sends [`LookupConfig::wikipedia_user_agent`]. The
//! search endpoint rejects obvious bot agents, so the search client sends a
//! browser User-Agent (rotated, or [`LookupConfig::user_agent`] if set) and
//! keeps a cookie store.

use crate::config::LookupConfig;
use crate::error::LookupError;
use rand::seq::SliceRandom;
use std::time::Duration;

/// Browser User-Agent strings for the search client.
const BROWSER_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// Which service a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientKind {
    /// MediaWiki action API; identifies itself.
    Encyclopedia,
    /// DuckDuckGo HTML endpoint; presents as a browser.
    WebSearch,
}

impl ClientKind {
    /// The User-Agent this kind of client sends.
    pub fn user_agent(self, config: &LookupConfig) -> String {
        match self {
            Self::Encyclopedia => config.wikipedia_user_agent.clone(),
            Self::WebSearch => config
                .user_agent
                .clone()
                .unwrap_or_else(|| random_browser_user_agent().to_owned()),
        }
    }
}

/// Build a [`reqwest::Client`] for `kind`.
///
/// Both kinds share the configured timeout and a redirect limit of 10; only
/// the search client keeps cookies between requests.
///
/// # Errors
///
/// Returns [`LookupError::Http`] if the client cannot be constructed.
pub fn build_client(
    kind: ClientKind,
    config: &LookupConfig,
) -> Result<reqwest::Client, LookupError> {
    reqwest::Client::builder()
        .cookie_store(kind == ClientKind::WebSearch)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(kind.user_agent(config))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| LookupError::Http(format!("failed to build HTTP client: {e}")))
}

fn random_browser_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    BROWSER_USER_AGENTS
        .choose(&mut rng)
        .copied()
        // non-empty; choose only returns None on empty slices
        .unwrap_or(BROWSER_USER_AGENTS[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_WIKIPEDIA_USER_AGENT;

    #[test]
    fn encyclopedia_client_identifies_itself() {
        let ua = ClientKind::Encyclopedia.user_agent(&LookupConfig::default());
        assert_eq!(ua, DEFAULT_WIKIPEDIA_USER_AGENT);
        assert!(!ua.starts_with("Mozilla/"));
    }

    #[test]
    fn encyclopedia_client_ignores_browser_override() {
        let config = LookupConfig {
            user_agent: Some("Mozilla/5.0 Custom".into()),
            ..Default::default()
        };
        assert_eq!(
            ClientKind::Encyclopedia.user_agent(&config),
            DEFAULT_WIKIPEDIA_USER_AGENT
        );
    }

    #[test]
    fn search_client_rotates_browser_agents() {
        let ua = ClientKind::WebSearch.user_agent(&LookupConfig::default());
        assert!(BROWSER_USER_AGENTS.contains(&ua.as_str()));
    }

    #[test]
    fn search_client_uses_custom_agent() {
        let config = LookupConfig {
            user_agent: Some("ResearchBot/1.0".into()),
            ..Default::default()
        };
        assert_eq!(ClientKind::WebSearch.user_agent(&config), "ResearchBot/1.0");
    }

    #[test]
    fn both_clients_build_with_default_config() {
        let config = LookupConfig::default();
        assert!(build_client(ClientKind::Encyclopedia, &config).is_ok());
        assert!(build_client(ClientKind::WebSearch, &config).is_ok());
    }
}
