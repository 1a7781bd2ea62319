//! Query classification.
//!
//! Every stage (matching, ranking, highlighting) re-derives the lookup mode
//! from the query text through this module, so they can never disagree
//! about how a given query is interpreted.

use serde::Serialize;

/// Queries shorter than this (after trimming, in characters) are not searched.
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Prefix lookup over record codes.
    Code,
    /// Conjunctive substring lookup over record names.
    Name,
}

impl Mode {
    /// Derives the mode of an already trimmed query without the length check.
    ///
    /// A query is a code lookup when it contains an ASCII digit and either
    /// starts with a digit or contains a period.
    pub fn derive(query: &str) -> Self {
        let has_digit = query.chars().any(|c| c.is_ascii_digit());
        let leading_signal =
            query.chars().next().is_some_and(|c| c.is_ascii_digit()) || query.contains('.');
        if has_digit && leading_signal {
            Mode::Code
        } else {
            Mode::Name
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Code => "code",
            Mode::Name => "name",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a raw query. `None` means the query is too short to search.
pub fn classify(query: &str) -> Option<Mode> {
    let trimmed = query.trim();
    if !is_searchable(trimmed) {
        return None;
    }
    Some(Mode::derive(trimmed))
}

pub(crate) fn is_searchable(trimmed: &str) -> bool {
    trimmed.chars().nth(MIN_QUERY_CHARS - 1).is_some()
}

/// Keeps only ASCII digits and periods.
pub fn clean_code_query(query: &str) -> String {
    query
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

/// Lowercased query words split on whitespace runs; empty tokens dropped.
pub fn name_words(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}
