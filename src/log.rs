//! Append-only research log.
//!
//! One block per submission:
//!
//! ```text
//! Timestamp: 2026-10-17 14:03:09
//! Topic: Rust
//! Summary: Rust is fast.
//! Sources: ['https://en.wikipedia.org/wiki/Rust_(programming_language)']
//! Tools Used: ['wiki', 'search']
//! --------------------------------------------------
//! ```
//!
//! The file is opened in append mode for each write and closed straight
//! after. Existing bytes are never touched.

use crate::aggregate::ResearchRecord;
use crate::error::Result;
use chrono::{Local, NaiveDateTime};
use research_sources::Tool;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Format of the `Timestamp:` line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Width of the rule line closing each block.
pub const RULE_WIDTH: usize = 50;

/// Handle on the research log file. Holds only the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchLog {
    path: PathBuf,
}

impl ResearchLog {
    /// Log stored at `path`; nothing is created until the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `record` stamped with the current local time.
    pub async fn append(&self, record: &ResearchRecord) -> Result<()> {
        self.append_at(record, Local::now().naive_local()).await
    }

    /// Append `record` stamped with `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ResearchError::Io`] if the file cannot be opened or
    /// written.
    pub async fn append_at(&self, record: &ResearchRecord, timestamp: NaiveDateTime) -> Result<()> {
        let block = render_block(record, timestamp);
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(block.as_bytes()).await?;
        file.flush().await?;
        tracing::debug!(path = %self.path.display(), bytes = block.len(), "research record appended");
        Ok(())
    }

    /// Full contents of the log, or an empty string if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Any I/O error other than "not found" is returned.
    pub async fn read_all(&self) -> Result<String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Serialize one record as a log block.
pub fn render_block(record: &ResearchRecord, timestamp: NaiveDateTime) -> String {
    let tools: Vec<&str> = record.tools_used.iter().map(Tool::name).collect();
    format!(
        "Timestamp: {}\nTopic: {}\nSummary: {}\nSources: {}\nTools Used: {}\n{}\n",
        timestamp.format(TIMESTAMP_FORMAT),
        record.topic,
        record.summary,
        list_literal(&record.sources),
        list_literal(&tools),
        "-".repeat(RULE_WIDTH),
    )
}

/// Render strings as a bracketed, quoted list: `['a', "it's"]`.
pub fn list_literal<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| quote(s.as_ref())).collect();
    format!("[{}]", quoted.join(", "))
}

/// Quote one string, preferring single quotes and switching to double quotes
/// when that avoids escaping.
fn quote(s: &str) -> String {
    let delim = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(delim);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}
