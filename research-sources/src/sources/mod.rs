//! Lookup implementations.
//!
//! Each module provides a struct implementing [`crate::source::LookupSource`]
//! for one external information service.

pub mod duckduckgo;
pub mod wikipedia;

pub use duckduckgo::DuckDuckGoSource;
pub use wikipedia::WikipediaSource;
