//! Research assistant: topic lookups with an append-only research log.
//!
//! A submission flows through a single pipeline:
//! Topic → Wikipedia → DuckDuckGo → summary → research log
//!
//! # Architecture
//!
//! - **Lookups**: the `research-sources` crate queries Wikipedia and
//!   DuckDuckGo and reports each result as a `LookupOutcome`
//! - **Aggregation**: [`aggregate`] folds both outcomes into a
//!   [`ResearchRecord`] with a six-line offline summary
//! - **Log**: [`log::ResearchLog`] appends one block per record to a flat file
//! - **Front end**: [`server`] exposes [`Researcher`] behind an HTML form

pub mod aggregate;
pub mod config;
pub mod error;
pub mod log;
pub mod pipeline;
pub mod server;

pub use aggregate::{ResearchRecord, aggregate, format_record, summarize_offline};
pub use config::AppConfig;
pub use error::{ResearchError, Result};
pub use log::ResearchLog;
pub use pipeline::{Researcher, Submission};
