//! The research pipeline: lookup, aggregate, log, re-read.
//!
//! [`Researcher`] is the request/response boundary every front end talks to.
//! It knows nothing about HTML or HTTP.

use crate::aggregate::{ResearchRecord, aggregate, format_record};
use crate::config::AppConfig;
use crate::error::Result;
use crate::log::ResearchLog;
use research_sources::{DuckDuckGoSource, LookupConfig, LookupSource, WikipediaSource};

/// What a submission hands back to the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// The record that was just logged.
    pub record: ResearchRecord,
    /// Display text for the current record.
    pub current: String,
    /// Full log contents after the append.
    pub saved: String,
}

/// Runs research submissions against an encyclopedia source `W` and a web
/// search source `S`.
pub struct Researcher<W, S> {
    wiki: W,
    search: S,
    lookup: LookupConfig,
    log: ResearchLog,
}

impl Researcher<WikipediaSource, DuckDuckGoSource> {
    /// Researcher backed by the live Wikipedia and DuckDuckGo services.
    pub fn live(config: &AppConfig) -> Self {
        Self::new(
            WikipediaSource,
            DuckDuckGoSource,
            config.lookup.clone(),
            ResearchLog::new(&config.log_path),
        )
    }
}

impl<W: LookupSource, S: LookupSource> Researcher<W, S> {
    /// Researcher over arbitrary sources; tests pass canned ones.
    pub fn new(wiki: W, search: S, lookup: LookupConfig, log: ResearchLog) -> Self {
        Self {
            wiki,
            search,
            lookup,
            log,
        }
    }

    /// The log this researcher appends to.
    pub fn log(&self) -> &ResearchLog {
        &self.log
    }

    /// Saved research shown when the page is first opened.
    pub async fn on_load(&self) -> Result<String> {
        self.log.read_all().await
    }

    /// Research `topic`: both lookups in order, then append and re-read the log.
    ///
    /// Lookup failures end up in the record text; only log I/O can fail here.
    pub async fn on_submit(&self, topic: &str) -> Result<Submission> {
        tracing::info!("research submission received");
        tracing::trace!(topic, "research topic");

        let wiki = self.wiki.lookup(topic, &self.lookup).await;
        tracing::debug!(tool = %self.wiki.tool(), found = wiki.is_found(), "lookup finished");
        let search = self.search.lookup(topic, &self.lookup).await;
        tracing::debug!(tool = %self.search.tool(), found = search.is_found(), "lookup finished");

        let record = aggregate(topic, &wiki, &search);
        tracing::info!(
            sources = record.sources.len(),
            tools = ?record.tools_used,
            "research record assembled"
        );

        self.log.append(&record).await?;
        let saved = self.log.read_all().await?;

        Ok(Submission {
            current: format_record(&record),
            record,
            saved,
        })
    }
}
