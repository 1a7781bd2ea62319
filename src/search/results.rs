use crate::dataset::Record;
use crate::query::Mode;

/// Records shown before the "show more" expansion.
pub const DEFAULT_DISPLAY_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<'a> {
    /// The query was too short; nothing was searched.
    NotSearched,
    /// The query was searched and matched nothing.
    NoMatches { query: String },
    Found(SearchResults<'a>),
}

impl<'a> SearchOutcome<'a> {
    pub fn was_searched(&self) -> bool {
        !matches!(self, SearchOutcome::NotSearched)
    }

    pub fn results(&self) -> Option<&SearchResults<'a>> {
        match self {
            SearchOutcome::Found(results) => Some(results),
            _ => None,
        }
    }

    pub fn total(&self) -> usize {
        self.results().map_or(0, SearchResults::total)
    }

    pub fn with_display_limit(self, limit: usize) -> Self {
        match self {
            SearchOutcome::Found(results) => {
                SearchOutcome::Found(results.with_display_limit(limit))
            }
            other => other,
        }
    }
}

/// The full ranked match list of one search, with a truncated primary view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults<'a> {
    query: String,
    mode: Mode,
    records: Vec<&'a Record>,
    display_limit: usize,
}

impl<'a> SearchResults<'a> {
    pub fn new(query: impl Into<String>, mode: Mode, records: Vec<&'a Record>) -> Self {
        Self {
            query: query.into(),
            mode,
            records,
            display_limit: DEFAULT_DISPLAY_LIMIT,
        }
    }

    /// Changes how many records the primary view shows. Zero is ignored.
    pub fn with_display_limit(mut self, limit: usize) -> Self {
        if limit > 0 {
            self.display_limit = limit;
        }
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn display_limit(&self) -> usize {
        self.display_limit
    }

    /// The first `display_limit` records.
    pub fn primary(&self) -> &[&'a Record] {
        &self.records[..self.records.len().min(self.display_limit)]
    }

    /// Every match in ranked order, as shown after expanding.
    pub fn all(&self) -> &[&'a Record] {
        &self.records
    }

    pub fn view(&self, expanded: bool) -> &[&'a Record] {
        if expanded { self.all() } else { self.primary() }
    }

    /// Records left out of the primary view.
    pub fn hidden(&self) -> usize {
        self.total() - self.primary().len()
    }

    pub fn is_truncated(&self) -> bool {
        self.hidden() > 0
    }
}
