//! Classify, match and rank a query against the dataset.

mod matcher;
mod ranker;
mod results;

use tracing::debug;

use crate::dataset::Dataset;
use crate::query::classify;

pub use matcher::find_matches;
pub use ranker::rank;
pub use results::{DEFAULT_DISPLAY_LIMIT, SearchOutcome, SearchResults};

/// Runs a full lookup.
///
/// Returns [`SearchOutcome::NotSearched`] when the trimmed query is shorter
/// than two characters and [`SearchOutcome::NoMatches`] when the query was
/// searched but nothing matched. Calls share no state.
pub fn search<'a>(query: &str, dataset: &'a Dataset) -> SearchOutcome<'a> {
    let Some(mode) = classify(query) else {
        return SearchOutcome::NotSearched;
    };
    let trimmed = query.trim();

    let matches = find_matches(mode, trimmed, dataset.records());
    debug!(query = trimmed, %mode, matches = matches.len(), "search performed");
    if matches.is_empty() {
        return SearchOutcome::NoMatches {
            query: trimmed.to_string(),
        };
    }

    let ranked = rank(matches, mode, trimmed);
    SearchOutcome::Found(SearchResults::new(trimmed, mode, ranked))
}

#[cfg(test)]
mod tests;
