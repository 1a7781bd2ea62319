//! Lookup over a fixed classification code list.
//!
//! A query is classified as a code lookup or a name lookup, matched against
//! the in-memory [`Dataset`], ranked, and highlighted per displayed value.
//! Everything here is synchronous and free of shared state.

pub mod dataset;
pub mod highlight;
pub mod query;
pub mod search;

pub use dataset::{Dataset, DatasetError, Record};
pub use highlight::{Highlighted, Highlighter, Span, highlight};
pub use query::{MIN_QUERY_CHARS, Mode, classify};
pub use search::{DEFAULT_DISPLAY_LIMIT, SearchOutcome, SearchResults, search};
