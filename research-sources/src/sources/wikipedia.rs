//! Wikipedia encyclopedia lookup via the MediaWiki action API.
//!
//! A lookup resolves the topic to a page, detects disambiguation pages and
//! returns the first few sentences of the plain-text intro together with the
//! canonical article URL.
//!
//! ## Requests
//!
//! 1. `prop=extracts|info|pageprops` for the topic, following redirects
//! 2. if the page is missing: `list=search` for a suggested title, then (1)
//!    again with that title
//! 3. if the page is a disambiguation page: `action=parse` for its rendered
//!    HTML; every list item with a link names one candidate

use crate::config::LookupConfig;
use crate::error::LookupError;
use crate::http::{self, ClientKind};
use crate::source::LookupSource;
use crate::types::{LookupOutcome, Tool};
use scraper::{Html, Selector};
use serde::Deserialize;
use std::collections::HashMap;

/// MediaWiki page prop set on disambiguation pages.
const DISAMBIGUATION_PROP: &str = "disambiguation";

/// Wikipedia summary lookup.
pub struct WikipediaSource;

/// List items in the table of contents carry this class fragment.
const TOC_ITEM_CLASS: &str = "tocsection";

/// A resolved encyclopedia answer, before it is folded into a [`LookupOutcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WikiSummary {
    /// A regular article.
    Article { extract: String, url: String },
    /// A disambiguation page and the candidates it lists.
    Disambiguation { title: String, candidates: Vec<String> },
}

impl WikiSummary {
    fn into_outcome(self) -> LookupOutcome {
        match self {
            Self::Article { extract, url } => LookupOutcome::Found {
                text: extract,
                sources: vec![url],
            },
            Self::Disambiguation { title, candidates } => {
                LookupOutcome::AmbiguousTopic(may_refer_to(&title, &candidates))
            }
        }
    }
}

/// Render the candidate list of an ambiguous topic.
pub fn may_refer_to(title: &str, candidates: &[String]) -> String {
    format!("\"{title}\" may refer to: \n{}", candidates.join("\n"))
}

// ---------------------------------------------------------------------------
// API response shapes (formatversion=2)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    query: Option<ApiQuery>,
    #[serde(default)]
    parse: Option<ApiParsed>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiParsed {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Default, Deserialize)]
struct ApiQuery {
    #[serde(default)]
    pages: Vec<ApiPage>,
    #[serde(default)]
    search: Vec<ApiSearchHit>,
    #[serde(default)]
    searchinfo: Option<ApiSearchInfo>,
}

#[derive(Debug, Deserialize)]
struct ApiPage {
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    fullurl: Option<String>,
    #[serde(default)]
    pageprops: HashMap<String, serde_json::Value>,
}

impl ApiPage {
    fn exists(&self) -> bool {
        !self.missing && !self.invalid
    }

    fn is_disambiguation(&self) -> bool {
        self.pageprops.contains_key(DISAMBIGUATION_PROP)
    }
}

#[derive(Debug, Deserialize)]
struct ApiSearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ApiSearchInfo {
    #[serde(default)]
    suggestion: Option<String>,
}

fn parse_envelope(body: &str) -> Result<ApiResponse, LookupError> {
    let response: ApiResponse = serde_json::from_str(body)
        .map_err(|e| LookupError::Parse(format!("invalid MediaWiki response: {e}")))?;
    if let Some(err) = response.error {
        return Err(LookupError::Http(format!(
            "MediaWiki API error ({}): {}",
            err.code, err.info
        )));
    }
    Ok(response)
}

fn parse_api_response(body: &str) -> Result<ApiQuery, LookupError> {
    // An empty title yields a response with no `query` member at all.
    Ok(parse_envelope(body)?.query.unwrap_or_default())
}

/// First page of a `prop=...` response, if the page exists.
fn parse_page(body: &str) -> Result<Option<ApiPage>, LookupError> {
    let query = parse_api_response(body)?;
    Ok(query.pages.into_iter().next().filter(ApiPage::exists))
}

/// Suggested title from a `list=search` response: the spelling suggestion
/// when there is one, else the first hit.
fn parse_suggestion(body: &str) -> Result<Option<String>, LookupError> {
    let query = parse_api_response(body)?;
    let suggestion = query
        .searchinfo
        .and_then(|info| info.suggestion)
        .filter(|s| !s.is_empty());
    Ok(suggestion.or_else(|| query.search.into_iter().next().map(|hit| hit.title)))
}

/// Candidates from an `action=parse` response: the text of the first link in
/// each list item, skipping table-of-contents entries and unlinked items.
fn parse_candidates(body: &str) -> Result<Vec<String>, LookupError> {
    let parsed = parse_envelope(body)?
        .parse
        .ok_or_else(|| LookupError::Parse("parse response has no page text".into()))?;
    let fragment = Html::parse_fragment(&parsed.text);

    let item_sel = Selector::parse("li")
        .map_err(|e| LookupError::Parse(format!("invalid list item selector: {e:?}")))?;
    let link_sel = Selector::parse("a")
        .map_err(|e| LookupError::Parse(format!("invalid link selector: {e:?}")))?;

    let candidates = fragment
        .select(&item_sel)
        .filter(|item| {
            !item
                .value()
                .classes()
                .any(|class| class.contains(TOC_ITEM_CLASS))
        })
        .filter_map(|item| item.select(&link_sel).next())
        .map(|link| link.text().collect::<String>().trim().to_owned())
        .filter(|text| !text.is_empty())
        .collect();
    Ok(candidates)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

impl WikipediaSource {
    /// Resolve `topic` and fetch its summary.
    ///
    /// # Errors
    ///
    /// - [`LookupError::NotFound`] if neither the topic nor a search
    ///   suggestion resolves to a page
    /// - [`LookupError::Http`] on transport, status or API errors
    /// - [`LookupError::Parse`] on unexpected response shapes
    pub async fn fetch_summary(
        topic: &str,
        config: &LookupConfig,
    ) -> Result<WikiSummary, LookupError> {
        let client = http::build_client(ClientKind::Encyclopedia, config)?;

        let page = match query_page(&client, config, topic).await? {
            Some(page) => page,
            None => {
                let suggestion = query_suggestion(&client, config, topic)
                    .await?
                    .ok_or_else(|| LookupError::NotFound(topic.to_owned()))?;
                tracing::debug!(%suggestion, "Wikipedia page missing, using search suggestion");
                query_page(&client, config, &suggestion)
                    .await?
                    .ok_or_else(|| LookupError::NotFound(topic.to_owned()))?
            }
        };

        if page.is_disambiguation() {
            let candidates = query_candidates(&client, config, &page.title).await?;
            tracing::debug!(
                title = %page.title,
                candidates = candidates.len(),
                "Wikipedia topic is ambiguous"
            );
            return Ok(WikiSummary::Disambiguation {
                title: page.title,
                candidates,
            });
        }

        let url = page.fullurl.ok_or_else(|| {
            LookupError::Parse(format!("page \"{}\" has no canonical URL", page.title))
        })?;

        Ok(WikiSummary::Article {
            extract: page.extract.unwrap_or_default().trim().to_owned(),
            url,
        })
    }
}

impl LookupSource for WikipediaSource {
    async fn lookup(&self, topic: &str, config: &LookupConfig) -> LookupOutcome {
        tracing::trace!(topic, "Wikipedia lookup");

        match Self::fetch_summary(topic, config).await {
            Ok(summary) => summary.into_outcome(),
            Err(err) => {
                tracing::warn!(error = %err, "Wikipedia lookup failed");
                LookupOutcome::Failed(err.to_string())
            }
        }
    }

    fn tool(&self) -> Tool {
        Tool::Wiki
    }
}

async fn get_api(
    client: &reqwest::Client,
    config: &LookupConfig,
    action: &str,
    params: &[(&str, &str)],
) -> Result<String, LookupError> {
    let response = client
        .get(config.wikipedia_api_url())
        .query(&[("action", action), ("format", "json"), ("formatversion", "2")])
        .query(params)
        .send()
        .await
        .map_err(|e| LookupError::Http(format!("Wikipedia request failed: {e}")))?
        .error_for_status()
        .map_err(|e| LookupError::Http(format!("Wikipedia HTTP error: {e}")))?;

    let body = response
        .text()
        .await
        .map_err(|e| LookupError::Http(format!("Wikipedia response read failed: {e}")))?;

    tracing::trace!(bytes = body.len(), "Wikipedia response received");
    Ok(body)
}

async fn query_page(
    client: &reqwest::Client,
    config: &LookupConfig,
    title: &str,
) -> Result<Option<ApiPage>, LookupError> {
    let sentences = config.sentences.to_string();
    let body = get_api(
        client,
        config,
        "query",
        &[
            ("prop", "extracts|info|pageprops"),
            ("titles", title),
            ("redirects", "1"),
            ("exintro", "1"),
            ("explaintext", "1"),
            ("exsentences", sentences.as_str()),
            ("inprop", "url"),
            ("ppprop", DISAMBIGUATION_PROP),
        ],
    )
    .await?;
    parse_page(&body)
}

async fn query_suggestion(
    client: &reqwest::Client,
    config: &LookupConfig,
    topic: &str,
) -> Result<Option<String>, LookupError> {
    let body = get_api(
        client,
        config,
        "query",
        &[
            ("list", "search"),
            ("srsearch", topic),
            ("srlimit", "1"),
            ("srinfo", "suggestion"),
            ("srprop", ""),
        ],
    )
    .await?;
    parse_suggestion(&body)
}

async fn query_candidates(
    client: &reqwest::Client,
    config: &LookupConfig,
    title: &str,
) -> Result<Vec<String>, LookupError> {
    let body = get_api(
        client,
        config,
        "parse",
        &[
            ("page", title),
            ("prop", "text"),
            ("disablelimitreport", "1"),
            ("disableeditsection", "1"),
        ],
    )
    .await?;
    parse_candidates(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE_ARTICLE: &str = include_str!("../../test-data/wikipedia_article.json");
    const FIXTURE_DISAMBIGUATION: &str =
        include_str!("../../test-data/wikipedia_disambiguation.json");
    const FIXTURE_PARSED: &str = include_str!("../../test-data/wikipedia_disambiguation_parse.json");
    const FIXTURE_MISSING: &str = include_str!("../../test-data/wikipedia_missing.json");
    const FIXTURE_SEARCH: &str = include_str!("../../test-data/wikipedia_search.json");

    #[test]
    fn article_page_parses_extract_and_url() {
        let page = parse_page(FIXTURE_ARTICLE)
            .expect("should parse")
            .expect("page exists");
        assert_eq!(page.title, "Python (programming language)");
        assert!(!page.is_disambiguation());
        assert_eq!(
            page.fullurl.as_deref(),
            Some("https://en.wikipedia.org/wiki/Python_(programming_language)")
        );
        assert!(page.extract.expect("extract").starts_with("Python is"));
    }

    #[test]
    fn missing_page_parses_as_none() {
        assert!(parse_page(FIXTURE_MISSING).expect("should parse").is_none());
    }

    #[test]
    fn response_without_query_parses_as_none() {
        assert!(parse_page(r#"{"batchcomplete":true}"#)
            .expect("should parse")
            .is_none());
    }

    #[test]
    fn disambiguation_page_is_detected() {
        let page = parse_page(FIXTURE_DISAMBIGUATION)
            .expect("should parse")
            .expect("page exists");
        assert_eq!(page.title, "Mercury");
        assert!(page.is_disambiguation());
    }

    #[test]
    fn candidates_come_from_linked_list_items_in_order() {
        let candidates = parse_candidates(FIXTURE_PARSED).expect("should parse");
        assert_eq!(
            candidates,
            vec![
                "Mercury (element)".to_string(),
                "Mercury (mythology)".to_string(),
                "Mercury (planet)".to_string(),
            ]
        );
    }

    #[test]
    fn inline_and_toc_links_are_not_candidates() {
        let body = r##"{"parse":{"title":"Jaguar","text":"<div><p>The <a href=\"/wiki/Jaguar\">jaguar</a> is a cat.</p><ul><li class=\"toclevel-1 tocsection-1\"><a href=\"#Animals\">Animals</a></li></ul><ul><li><a href=\"/wiki/Jaguar_Cars\">Jaguar Cars</a>, a British manufacturer</li><li>A plain item</li></ul></div>"}}"##;
        assert_eq!(
            parse_candidates(body).expect("should parse"),
            vec!["Jaguar Cars".to_string()]
        );
    }

    #[test]
    fn parse_response_without_text_is_parse_error() {
        let err = parse_candidates(r#"{"batchcomplete":true}"#).unwrap_err();
        assert!(matches!(err, LookupError::Parse(_)));
    }

    #[test]
    fn suggestion_prefers_spelling_suggestion() {
        let body = r#"{"query":{"searchinfo":{"suggestion":"python"},"search":[{"ns":0,"title":"Pithon"}]}}"#;
        assert_eq!(
            parse_suggestion(body).expect("should parse"),
            Some("python".to_string())
        );
    }

    #[test]
    fn suggestion_falls_back_to_first_hit() {
        assert_eq!(
            parse_suggestion(FIXTURE_SEARCH).expect("should parse"),
            Some("Python (programming language)".to_string())
        );
    }

    #[test]
    fn suggestion_none_without_hits() {
        let body = r#"{"batchcomplete":true,"query":{"searchinfo":{"totalhits":0},"search":[]}}"#;
        assert!(parse_suggestion(body).expect("should parse").is_none());
    }

    #[test]
    fn api_error_is_reported() {
        let body = r#"{"error":{"code":"nosrsearch","info":"The \"srsearch\" parameter must be set."}}"#;
        let err = parse_suggestion(body).unwrap_err();
        assert!(err.to_string().contains("nosrsearch"));
    }

    #[test]
    fn non_json_body_is_parse_error() {
        let err = parse_page("<html>maintenance</html>").unwrap_err();
        assert!(matches!(err, LookupError::Parse(_)));
    }

    #[test]
    fn ambiguous_summary_renders_candidates() {
        let summary = WikiSummary::Disambiguation {
            title: "Mercury".into(),
            candidates: vec!["Mercury (planet)".into(), "Mercury (element)".into()],
        };
        assert_eq!(
            summary.into_outcome(),
            LookupOutcome::AmbiguousTopic(
                "\"Mercury\" may refer to: \nMercury (planet)\nMercury (element)".into()
            )
        );
    }

    #[test]
    fn article_summary_carries_single_source() {
        let summary = WikiSummary::Article {
            extract: "Rust is a language.".into(),
            url: "https://en.wikipedia.org/wiki/Rust_(programming_language)".into(),
        };
        let outcome = summary.into_outcome();
        assert_eq!(outcome.sources().len(), 1);
    }

    #[test]
    fn tool_is_wiki() {
        assert_eq!(WikipediaSource.tool(), Tool::Wiki);
    }

    #[tokio::test]
    #[ignore] // Live test — run with `cargo test -- --ignored`
    async fn live_wikipedia_lookup() {
        let outcome = WikipediaSource
            .lookup("Python (programming language)", &LookupConfig::default())
            .await;
        assert!(outcome.is_found(), "unexpected outcome: {outcome:?}");
    }
}
