//! Core types for lookup outcomes and tool identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single web search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The title of the result page.
    pub title: String,
    /// The result URL; empty when the engine gave no link for this hit.
    pub url: String,
    /// A text snippet summarising the page content.
    pub snippet: String,
}

/// The integrations a research submission can draw on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Encyclopedia summary lookup (Wikipedia).
    Wiki,
    /// Web search lookup (DuckDuckGo).
    Search,
}

impl Tool {
    /// Returns the short tag recorded in `tools_used`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Wiki => "wiki",
            Self::Search => "search",
        }
    }

    /// Returns all tools in the order a submission consults them.
    pub fn all() -> &'static [Tool] {
        &[Self::Wiki, Self::Search]
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a single lookup produced.
///
/// Lookups never fail as control flow; every failure mode is a variant here
/// and the caller decides how to render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupOutcome {
    /// The service answered. `sources` is in service order and may contain
    /// duplicates or empty strings.
    Found { text: String, sources: Vec<String> },
    /// The encyclopedia topic is ambiguous; the payload lists the candidates
    /// as `"<title>" may refer to: \n<candidate>\n...`.
    AmbiguousTopic(String),
    /// The lookup failed; the payload is a human-readable reason.
    Failed(String),
}

impl LookupOutcome {
    /// Sources contributed by this outcome. Only `Found` carries any.
    pub fn sources(&self) -> &[String] {
        match self {
            Self::Found { sources, .. } => sources,
            Self::AmbiguousTopic(_) | Self::Failed(_) => &[],
        }
    }

    /// Whether the service returned a real answer.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}
