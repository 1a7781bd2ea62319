//! Text and JSON rendering of search outcomes for the terminal.

use crossterm::style::Stylize;
use serde_json::{Value, json};
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

use codelist_lookup::{Highlighted, Highlighter, Record, SearchOutcome};

use crate::config::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkStyle {
    /// Colored background through terminal escape sequences.
    Ansi,
    Markers { open: String, close: String },
}

impl MarkStyle {
    pub fn from_config(cfg: &AppConfig) -> Self {
        if cfg.color.enabled() {
            MarkStyle::Ansi
        } else {
            MarkStyle::Markers {
                open: cfg.markers.open.clone(),
                close: cfg.markers.close.clone(),
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Renderer {
    style: MarkStyle,
    more_hint: &'static str,
}

impl Renderer {
    pub fn new(style: MarkStyle, more_hint: &'static str) -> Self {
        Self { style, more_hint }
    }

    pub fn style(&self, highlighted: &Highlighted<'_>) -> String {
        match &self.style {
            MarkStyle::Markers { open, close } => highlighted.render_with(open, close),
            MarkStyle::Ansi => {
                let mut out = String::with_capacity(highlighted.text().len() * 2);
                for (piece, depth) in highlighted.segments() {
                    match depth {
                        0 => out.push_str(piece),
                        1 => out.push_str(&piece.bold().black().on_yellow().to_string()),
                        _ => out.push_str(&piece.bold().underlined().black().on_yellow().to_string()),
                    }
                }
                out
            }
        }
    }

    pub fn write_outcome<W: Write>(
        &self,
        out: &mut W,
        outcome: &SearchOutcome<'_>,
        expanded: bool,
    ) -> io::Result<()> {
        let results = match outcome {
            SearchOutcome::NotSearched => {
                return writeln!(out, "Type at least 2 characters to search");
            }
            SearchOutcome::NoMatches { query } => {
                return writeln!(out, "Nothing found for \"{query}\". Try other keywords.");
            }
            SearchOutcome::Found(results) => results,
        };

        let view = results.view(expanded);
        write!(
            out,
            "Found {} records for \"{}\"",
            results.total(),
            results.query()
        )?;
        if view.len() < results.total() {
            write!(out, " (showing {})", view.len())?;
        }
        writeln!(out)?;

        let code_width = view
            .iter()
            .map(|r| r.code().width())
            .max()
            .unwrap_or_default();
        let index_width = view.len().to_string().len();
        let highlighter = Highlighter::new(results.query());
        for (i, record) in view.iter().enumerate() {
            self.write_record(out, i + 1, index_width, code_width, record, &highlighter)?;
        }

        if !expanded && results.is_truncated() {
            writeln!(
                out,
                "... and {} more records ({})",
                results.hidden(),
                self.more_hint
            )?;
        }
        Ok(())
    }

    fn write_record<W: Write>(
        &self,
        out: &mut W,
        index: usize,
        index_width: usize,
        code_width: usize,
        record: &Record,
        highlighter: &Highlighter,
    ) -> io::Result<()> {
        let padding = code_width.saturating_sub(record.code().width());
        writeln!(
            out,
            "{index:>index_width$}. {}{}  {}",
            self.style(&highlighter.highlight(record.code())),
            " ".repeat(padding),
            self.style(&highlighter.highlight(record.name()))
        )
    }
}

pub fn outcome_json(outcome: &SearchOutcome<'_>, expanded: bool) -> Value {
    match outcome {
        SearchOutcome::NotSearched => json!({ "state": "not_searched" }),
        SearchOutcome::NoMatches { query } => json!({
            "state": "no_matches",
            "query": query,
            "total": 0,
            "records": [],
        }),
        SearchOutcome::Found(results) => json!({
            "state": "found",
            "query": results.query(),
            "mode": results.mode(),
            "total": results.total(),
            "records": results.view(expanded),
        }),
    }
}
