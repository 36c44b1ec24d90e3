//! Combines lookup outcomes into a research record.
//!
//! Everything here is pure: the same two outcomes always yield the same
//! record and the same display text.

use research_sources::{LookupOutcome, Tool};

/// Number of lines kept from the combined lookup text.
pub const SUMMARY_LINES: usize = 6;

/// Summary used when the lookups produced no text at all.
pub const NO_SUMMARY: &str = "No summary available.";

/// The structured result of one research submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchRecord {
    /// The topic exactly as submitted.
    pub topic: String,
    /// First [`SUMMARY_LINES`] lines of the combined lookup text.
    pub summary: String,
    /// Encyclopedia URL followed by search result URLs.
    pub sources: Vec<String>,
    /// Tools whose lookup produced any text, in consultation order.
    pub tools_used: Vec<Tool>,
}

/// Render an outcome as the text it contributes to the summary.
///
/// Failures are rendered too: an ambiguous topic or a failed lookup still
/// contributes its message, and so still counts its tool as used.
pub fn render_outcome(tool: Tool, outcome: &LookupOutcome) -> String {
    match outcome {
        LookupOutcome::Found { text, .. } => text.clone(),
        LookupOutcome::AmbiguousTopic(candidates) => {
            format!("Disambiguation error: {candidates}")
        }
        LookupOutcome::Failed(reason) => match tool {
            Tool::Wiki => format!("Error fetching Wikipedia: {reason}"),
            Tool::Search => format!("Error with DuckDuckGo search: {reason}"),
        },
    }
}

/// Keep the first [`SUMMARY_LINES`] lines of `content`, trimmed.
pub fn summarize_offline(content: &str) -> String {
    let summary = content
        .split('\n')
        .take(SUMMARY_LINES)
        .collect::<Vec<_>>()
        .join("\n");
    let trimmed = summary.trim();
    if trimmed.is_empty() {
        NO_SUMMARY.to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Assemble a record from the encyclopedia and search outcomes.
pub fn aggregate(topic: &str, wiki: &LookupOutcome, search: &LookupOutcome) -> ResearchRecord {
    let mut collected = String::new();
    let mut sources = Vec::new();
    let mut tools_used = Vec::new();

    for (&tool, outcome) in Tool::all().iter().zip([wiki, search]) {
        let text = render_outcome(tool, outcome);
        if text.is_empty() {
            continue;
        }
        collected.push_str(&text);
        collected.push('\n');
        tools_used.push(tool);
        sources.extend(outcome.sources().iter().cloned());
    }

    ResearchRecord {
        topic: topic.to_owned(),
        summary: summarize_offline(&collected),
        sources,
        tools_used,
    }
}

/// Display text for the "current result" area.
pub fn format_record(record: &ResearchRecord) -> String {
    let tools = record
        .tools_used
        .iter()
        .map(Tool::name)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Topic: {}\n\nSummary:\n{}\n\nSources:\n{}\n\nTools Used: {tools}",
        record.topic,
        record.summary,
        record.sources.join("\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(text: &str, sources: &[&str]) -> LookupOutcome {
        LookupOutcome::Found {
            text: text.to_owned(),
            sources: sources.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    #[test]
    fn summary_keeps_first_six_lines() {
        let content = "1\n2\n3\n4\n5\n6\n7\n8\n";
        assert_eq!(summarize_offline(content), "1\n2\n3\n4\n5\n6");
    }

    #[test]
    fn summary_trims_surrounding_whitespace() {
        assert_eq!(summarize_offline("  one\ntwo  \n"), "one\ntwo");
    }

    #[test]
    fn blank_summary_falls_back() {
        assert_eq!(summarize_offline(""), NO_SUMMARY);
        assert_eq!(summarize_offline("\n \n\t\n"), NO_SUMMARY);
    }

    #[test]
    fn blank_lines_count_toward_the_limit() {
        let content = "a\n\n\n\n\n\nb\n";
        assert_eq!(summarize_offline(content), "a");
    }

    #[test]
    fn both_found_uses_both_tools_in_order() {
        let wiki = found(
            "Python is a language. It is popular. It is readable.",
            &["https://en.wikipedia.org/wiki/Python_(programming_language)"],
        );
        let search = found(
            "snippet one\nsnippet two\nsnippet three",
            &["https://a.example", "https://b.example", "https://c.example"],
        );

        let record = aggregate("Python (programming language)", &wiki, &search);

        assert_eq!(record.tools_used, vec![Tool::Wiki, Tool::Search]);
        assert_eq!(record.sources.len(), 4);
        assert_eq!(
            record.sources[0],
            "https://en.wikipedia.org/wiki/Python_(programming_language)"
        );
        assert_eq!(record.sources[3], "https://c.example");
        assert_eq!(
            record.summary,
            "Python is a language. It is popular. It is readable.\nsnippet one\nsnippet two\nsnippet three"
        );
    }

    #[test]
    fn summary_matches_combined_text_rule() {
        let wiki = found("w1\nw2\nw3\nw4", &["https://w.example"]);
        let search = found("s1\ns2\ns3", &["https://s.example"]);
        let record = aggregate("t", &wiki, &search);
        assert_eq!(record.summary, summarize_offline("w1\nw2\nw3\nw4\ns1\ns2\ns3\n"));
        assert_eq!(record.summary, "w1\nw2\nw3\nw4\ns1\ns2");
    }

    #[test]
    fn disambiguation_text_counts_as_wiki_output() {
        let wiki = LookupOutcome::AmbiguousTopic(
            "\"Mercury\" may refer to: \nMercury (planet)\nMercury (element)".into(),
        );
        let search = found("Mercury is the first planet.", &["https://m.example"]);

        let record = aggregate("Mercury", &wiki, &search);

        assert!(record.summary.starts_with("Disambiguation error: \"Mercury\" may refer to:"));
        assert_eq!(record.tools_used, vec![Tool::Wiki, Tool::Search]);
        assert_eq!(record.sources, vec!["https://m.example".to_string()]);
    }

    #[test]
    fn both_failures_still_mark_both_tools() {
        let wiki = LookupOutcome::Failed("HTTP error: connection refused".into());
        let search = LookupOutcome::Failed("HTTP error: timed out".into());

        let record = aggregate("anything", &wiki, &search);

        assert_eq!(record.tools_used, vec![Tool::Wiki, Tool::Search]);
        assert!(record.sources.is_empty());
        assert_eq!(
            record.summary,
            "Error fetching Wikipedia: HTTP error: connection refused\nError with DuckDuckGo search: HTTP error: timed out"
        );
    }

    #[test]
    fn empty_found_text_is_skipped() {
        let wiki = found("", &["https://ignored.example"]);
        let search = found("only search", &["https://s.example"]);

        let record = aggregate("t", &wiki, &search);

        assert_eq!(record.tools_used, vec![Tool::Search]);
        assert_eq!(record.sources, vec!["https://s.example".to_string()]);
    }

    #[test]
    fn nothing_found_gives_no_summary() {
        let record = aggregate("t", &found("", &[]), &found("", &[]));
        assert_eq!(record.summary, NO_SUMMARY);
        assert!(record.tools_used.is_empty());
        assert!(record.sources.is_empty());
    }

    #[test]
    fn duplicate_and_empty_urls_are_preserved() {
        let wiki = found("w", &["https://dup.example"]);
        let search = found("s1\ns2", &["https://dup.example", ""]);
        let record = aggregate("t", &wiki, &search);
        assert_eq!(
            record.sources,
            vec![
                "https://dup.example".to_string(),
                "https://dup.example".to_string(),
                String::new(),
            ]
        );
    }

    #[test]
    fn format_record_layout() {
        let record = ResearchRecord {
            topic: "Rust".into(),
            summary: "Rust is fast.".into(),
            sources: vec!["https://a.example".into(), "https://b.example".into()],
            tools_used: vec![Tool::Wiki, Tool::Search],
        };
        assert_eq!(
            format_record(&record),
            "Topic: Rust\n\nSummary:\nRust is fast.\n\nSources:\nhttps://a.example\nhttps://b.example\n\nTools Used: wiki, search"
        );
    }
}
