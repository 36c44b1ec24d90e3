//! DuckDuckGo web search lookup.
//!
//! Uses the HTML-only version at `https://html.duckduckgo.com/html/`
//! which requires no JavaScript and is tolerant of automated requests.

use crate::config::LookupConfig;
use crate::error::LookupError;
use crate::http::{self, ClientKind};
use crate::source::LookupSource;
use crate::types::{LookupOutcome, SearchResult, Tool};
use scraper::{Html, Selector};
use url::Url;

/// DuckDuckGo HTML search scraper.
///
/// Sends a POST to the HTML-only endpoint and keeps the first
/// `config.max_results` organic hits.
pub struct DuckDuckGoSource;

impl DuckDuckGoSource {
    /// Extract the actual URL from DuckDuckGo's redirect wrapper.
    ///
    /// DDG wraps URLs like: `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`
    /// We parse out the `uddg` query parameter and URL-decode it.
    fn extract_url(href: &str) -> Option<String> {
        let full_href = if href.starts_with("//") {
            format!("https:{href}")
        } else {
            href.to_string()
        };

        let parsed = Url::parse(&full_href).ok()?;

        if parsed.host_str() == Some("duckduckgo.com") && parsed.path().starts_with("/l/") {
            parsed
                .query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, value)| value.into_owned())
        } else {
            Some(full_href)
        }
    }

    /// Run the search and return the parsed hits.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if the request fails, or
    /// [`LookupError::Parse`] if the page holds no organic results.
    pub async fn search(
        query: &str,
        config: &LookupConfig,
    ) -> Result<Vec<SearchResult>, LookupError> {
        let client = http::build_client(ClientKind::WebSearch, config)?;

        let mut params = vec![("q", query)];
        if config.safe_search {
            params.push(("kp", "1"));
        }

        let response = client
            .post(&config.duckduckgo_url)
            .form(&params)
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| LookupError::Http(format!("DuckDuckGo request failed: {e}")))?
            .error_for_status()
            .map_err(|e| LookupError::Http(format!("DuckDuckGo HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| LookupError::Http(format!("DuckDuckGo response read failed: {e}")))?;

        tracing::trace!(bytes = html.len(), "DuckDuckGo response received");

        let results = parse_duckduckgo_html(&html, config.max_results)?;
        if results.is_empty() {
            return Err(LookupError::Parse("no results found".into()));
        }
        Ok(results)
    }
}

impl LookupSource for DuckDuckGoSource {
    async fn lookup(&self, topic: &str, config: &LookupConfig) -> LookupOutcome {
        tracing::trace!(topic, "DuckDuckGo lookup");

        match Self::search(topic, config).await {
            Ok(results) => {
                tracing::debug!(count = results.len(), "DuckDuckGo lookup succeeded");
                outcome_from_results(results)
            }
            Err(err) => {
                tracing::warn!(error = %err, "DuckDuckGo lookup failed");
                LookupOutcome::Failed(err.to_string())
            }
        }
    }

    fn tool(&self) -> Tool {
        Tool::Search
    }
}

/// Snippets joined by newlines, URLs in result order.
pub(crate) fn outcome_from_results(results: Vec<SearchResult>) -> LookupOutcome {
    let text = results
        .iter()
        .map(|r| r.snippet.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let sources = results.into_iter().map(|r| r.url).collect();
    LookupOutcome::Found { text, sources }
}

/// Collapse runs of whitespace (including newlines) into single spaces.
fn clean_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse DuckDuckGo HTML response into search results.
///
/// A hit whose title link has no usable `href` is kept with an empty URL.
pub(crate) fn parse_duckduckgo_html(
    html: &str,
    max_results: usize,
) -> Result<Vec<SearchResult>, LookupError> {
    let document = Html::parse_document(html);

    let result_sel = Selector::parse(
        ".result.results_links.results_links_deep:not(.result--ad), .web-result:not(.result--ad)",
    )
    .map_err(|e| LookupError::Parse(format!("invalid result selector: {e:?}")))?;
    let title_sel = Selector::parse(".result__a")
        .map_err(|e| LookupError::Parse(format!("invalid title selector: {e:?}")))?;
    let snippet_sel = Selector::parse(".result__snippet")
        .map_err(|e| LookupError::Parse(format!("invalid snippet selector: {e:?}")))?;

    let mut results = Vec::new();

    for element in document.select(&result_sel) {
        let Some(title_el) = element.select(&title_sel).next() else {
            continue;
        };

        let title = clean_text(&title_el.text().collect::<String>());
        if title.is_empty() {
            continue;
        }

        let url = title_el
            .value()
            .attr("href")
            .and_then(DuckDuckGoSource::extract_url)
            .unwrap_or_default();

        let snippet = element
            .select(&snippet_sel)
            .next()
            .map(|el| clean_text(&el.text().collect::<String>()))
            .unwrap_or_default();

        results.push(SearchResult {
            title,
            url,
            snippet,
        });

        if results.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = results.len(), "DuckDuckGo results parsed");
    Ok(results)
}
