//! Marks the parts of a displayed code or name that a query matched.
//!
//! The result is a tree of spans over the original text rather than markup,
//! so front-ends choose how marks are drawn. Name words are applied one after
//! another; a later word is only searched inside the text runs left by the
//! earlier ones, so overlapping words produce nested marks and a match never
//! straddles an existing mark boundary.

use regex::Regex;
use std::ops::Range;
use tracing::warn;

use crate::query::{MIN_QUERY_CHARS, Mode, clean_code_query, is_searchable, name_words};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    /// Unmarked byte range of the text.
    Text(Range<usize>),
    Mark(Vec<Span>),
}

impl Span {
    fn start(&self) -> Option<usize> {
        match self {
            Span::Text(range) => Some(range.start),
            Span::Mark(children) => children.first().and_then(Span::start),
        }
    }

    fn end(&self) -> Option<usize> {
        match self {
            Span::Text(range) => Some(range.end),
            Span::Mark(children) => children.last().and_then(Span::end),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted<'a> {
    text: &'a str,
    spans: Vec<Span>,
}

impl<'a> Highlighted<'a> {
    fn plain(text: &'a str) -> Self {
        let spans = if text.is_empty() {
            Vec::new()
        } else {
            vec![Span::Text(0..text.len())]
        };
        Self { text, spans }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn is_marked(&self) -> bool {
        self.spans.iter().any(|s| matches!(s, Span::Mark(_)))
    }

    /// Byte ranges of every mark, outer marks before the marks nested in them.
    pub fn marked_ranges(&self) -> Vec<Range<usize>> {
        fn collect(spans: &[Span], out: &mut Vec<Range<usize>>) {
            for span in spans {
                if let Span::Mark(children) = span {
                    if let (Some(start), Some(end)) = (span.start(), span.end()) {
                        out.push(start..end);
                    }
                    collect(children, out);
                }
            }
        }
        let mut out = Vec::new();
        collect(&self.spans, &mut out);
        out
    }

    /// Flattens the tree into text pieces tagged with their mark depth.
    pub fn segments(&self) -> Vec<(&'a str, usize)> {
        fn walk<'t>(text: &'t str, spans: &[Span], depth: usize, out: &mut Vec<(&'t str, usize)>) {
            for span in spans {
                match span {
                    Span::Text(range) => out.push((&text[range.clone()], depth)),
                    Span::Mark(children) => walk(text, children, depth + 1, out),
                }
            }
        }
        let mut out = Vec::new();
        walk(self.text, &self.spans, 0, &mut out);
        out
    }

    /// Renders marks with literal open/close markers, e.g. `<mark>`/`</mark>`.
    pub fn render_with(&self, open: &str, close: &str) -> String {
        fn write(text: &str, spans: &[Span], open: &str, close: &str, out: &mut String) {
            for span in spans {
                match span {
                    Span::Text(range) => out.push_str(&text[range.clone()]),
                    Span::Mark(children) => {
                        out.push_str(open);
                        write(text, children, open, close, out);
                        out.push_str(close);
                    }
                }
            }
        }
        let mut out = String::with_capacity(self.text.len());
        write(self.text, &self.spans, open, close, &mut out);
        out
    }
}

/// Highlights `text` for `query`, re-deriving the lookup mode from the query.
///
/// Shorthand for [`Highlighter::new`] followed by [`Highlighter::highlight`];
/// prefer building one [`Highlighter`] when marking many values for the same
/// query.
pub fn highlight<'a>(text: &'a str, query: &str) -> Highlighted<'a> {
    Highlighter::new(query).highlight(text)
}

/// Query-specific marking rules, prepared once and applied to any number of
/// displayed values.
///
/// Code lookups mark the cleaned query when a text starts with it. Name
/// lookups mark every occurrence of each query word of at least two
/// characters, matched literally and with the same lowercasing the matcher
/// uses, so every name a search returns gets its words marked. Queries
/// under two characters leave the text unmarked.
#[derive(Debug, Clone)]
pub struct Highlighter {
    rule: Option<Rule>,
}

#[derive(Debug, Clone)]
enum Rule {
    CodePrefix(String),
    NameWords(Vec<Regex>),
}

impl Highlighter {
    pub fn new(query: &str) -> Self {
        let query = query.trim();
        if !is_searchable(query) {
            return Self { rule: None };
        }

        let rule = match Mode::derive(query) {
            Mode::Code => {
                let clean = clean_code_query(query);
                (!clean.is_empty()).then_some(Rule::CodePrefix(clean))
            }
            Mode::Name => {
                let patterns: Vec<Regex> = name_words(query)
                    .iter()
                    .filter(|w| w.chars().count() >= MIN_QUERY_CHARS)
                    .filter_map(|w| literal_pattern(w))
                    .collect();
                (!patterns.is_empty()).then_some(Rule::NameWords(patterns))
            }
        };
        Self { rule }
    }

    pub fn highlight<'a>(&self, text: &'a str) -> Highlighted<'a> {
        let mut out = Highlighted::plain(text);
        match &self.rule {
            None => {}
            Some(Rule::CodePrefix(clean)) => {
                if text.starts_with(clean.as_str()) {
                    let mut spans = vec![Span::Mark(vec![Span::Text(0..clean.len())])];
                    if clean.len() < text.len() {
                        spans.push(Span::Text(clean.len()..text.len()));
                    }
                    out.spans = spans;
                }
            }
            Some(Rule::NameWords(patterns)) => {
                for re in patterns {
                    out.spans = mark_word(text, std::mem::take(&mut out.spans), re);
                }
            }
        }
        out
    }
}

// Words arrive lowercased and are searched in lowercased text.
fn literal_pattern(word: &str) -> Option<Regex> {
    match Regex::new(&regex::escape(word)) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(word, error = %e, "skipping highlight word");
            None
        }
    }
}

/// Lowercased copy of `text` with, for every byte of it, the byte range of
/// the original char it came from.
struct Folded {
    lower: String,
    origin: Vec<Range<usize>>,
}

impl Folded {
    fn new(text: &str, offset: usize) -> Self {
        let mut lower = String::with_capacity(text.len());
        let mut origin = Vec::with_capacity(text.len());
        for (i, c) in text.char_indices() {
            let source = offset + i..offset + i + c.len_utf8();
            for l in c.to_lowercase() {
                lower.push(l);
                origin.resize(lower.len(), source.clone());
            }
        }
        Self { lower, origin }
    }
}

fn mark_word(text: &str, spans: Vec<Span>, re: &Regex) -> Vec<Span> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        match span {
            Span::Mark(children) => out.push(Span::Mark(mark_word(text, children, re))),
            Span::Text(range) => {
                let folded = Folded::new(&text[range.clone()], range.start);
                let mut cursor = range.start;
                for m in re.find_iter(&folded.lower) {
                    if m.start() == m.end() {
                        continue;
                    }
                    let start = folded.origin[m.start()].start;
                    let end = folded.origin[m.end() - 1].end;
                    if start < cursor {
                        continue;
                    }
                    if cursor < start {
                        out.push(Span::Text(cursor..start));
                    }
                    out.push(Span::Mark(vec![Span::Text(start..end)]));
                    cursor = end;
                }
                if cursor < range.end {
                    out.push(Span::Text(cursor..range.end));
                }
            }
        }
    }
    out
}
