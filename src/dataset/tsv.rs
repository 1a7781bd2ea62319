//! Tab-separated source table: one `code<TAB>name` pair per line, no header.

use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingSeparator,
    EmptyCode,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingSeparator => f.write_str("no tab separator"),
            SkipReason::EmptyCode => f.write_str("empty code"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the input.
    pub line: usize,
    pub reason: SkipReason,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub lines_read: usize,
    pub loaded: usize,
    pub skipped: Vec<SkippedLine>,
}

pub(crate) fn parse(input: &str) -> (Vec<(String, String)>, LoadReport) {
    let mut pairs = Vec::new();
    let mut report = LoadReport::default();

    for (index, raw_line) in input.lines().enumerate() {
        let line_no = index + 1;
        report.lines_read = line_no;

        if raw_line.trim().is_empty() {
            continue;
        }

        let mut columns = raw_line.split('\t');
        let (Some(code), Some(name)) = (columns.next(), columns.next()) else {
            warn!(line = line_no, content = raw_line, "skipping line without tab separator");
            report.skipped.push(SkippedLine {
                line: line_no,
                reason: SkipReason::MissingSeparator,
                content: raw_line.to_string(),
            });
            continue;
        };

        let code = code.trim();
        if code.is_empty() {
            warn!(line = line_no, "skipping line with empty code");
            report.skipped.push(SkippedLine {
                line: line_no,
                reason: SkipReason::EmptyCode,
                content: raw_line.to_string(),
            });
            continue;
        }

        pairs.push((code.to_string(), name.trim().to_string()));
    }

    report.loaded = pairs.len();
    (pairs, report)
}
