//! Line-oriented lookup loop: each entered line is searched immediately.

use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

use codelist_lookup::{Dataset, SearchOutcome, search};

use super::render::Renderer;
use super::{EMPTY_HINT, ReplCommand, parse_command, write_help};
use crate::clipboard::CopyTarget;

pub const MORE_HINT: &str = "/more to show all";

pub fn run<R: BufRead, W: Write>(
    dataset: &Dataset,
    renderer: &Renderer,
    display_limit: usize,
    input: R,
    out: &mut W,
    clipboard: &mut dyn CopyTarget,
) -> Result<()> {
    writeln!(
        out,
        "codelist - {} records loaded, type /help for commands",
        dataset.len()
    )?;

    let mut last: Option<SearchOutcome<'_>> = None;
    let mut expanded = false;

    for (index, bytes) in input.split(b'\n').enumerate() {
        let line = match String::from_utf8(bytes?) {
            Ok(line) => line,
            Err(e) => {
                warn!(line = index + 1, error = %e, "skipping input that is not UTF-8");
                writeln!(out, "Input is not valid UTF-8, ignored")?;
                continue;
            }
        };
        let query = line.trim();
        if query.is_empty() {
            writeln!(out, "{EMPTY_HINT}")?;
            continue;
        }

        if let Some(command) = parse_command(query) {
            match command {
                ReplCommand::Quit => break,
                ReplCommand::Help => write_help(out)?,
                ReplCommand::More => match &last {
                    Some(outcome @ SearchOutcome::Found(_)) => {
                        expanded = true;
                        renderer.write_outcome(out, outcome, true)?;
                    }
                    _ => writeln!(out, "Nothing to expand")?,
                },
                ReplCommand::Copy(n) => {
                    let code = last
                        .as_ref()
                        .and_then(SearchOutcome::results)
                        .and_then(|r| r.view(expanded).get(n - 1))
                        .map(|record| record.code());
                    match code {
                        Some(code) => match clipboard.copy_text(code) {
                            Ok(()) => writeln!(out, "Copied {code}")?,
                            Err(e) => {
                                warn!(error = %e, "copy failed");
                                writeln!(out, "Copy failed: {e}")?;
                            }
                        },
                        None => writeln!(out, "No result #{n} to copy")?,
                    }
                }
                ReplCommand::Invalid(message) => writeln!(out, "{message}")?,
            }
            continue;
        }

        let outcome = search(query, dataset).with_display_limit(display_limit);
        debug!(query, total = outcome.total(), "interactive search");
        renderer.write_outcome(out, &outcome, false)?;
        last = Some(outcome);
        expanded = false;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::render::MarkStyle;
    use crate::clipboard::ClipboardError;
    use std::io::Cursor;

    #[derive(Default)]
    struct RecordingClipboard {
        copied: Vec<String>,
        fail: bool,
    }

    impl CopyTarget for RecordingClipboard {
        fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::NotAvailable);
            }
            self.copied.push(text.to_string());
            Ok(())
        }
    }

    fn session(dataset: &Dataset, script: &str, clipboard: &mut RecordingClipboard) -> String {
        let renderer = Renderer::new(
            MarkStyle::Markers {
                open: "<".to_string(),
                close: ">".to_string(),
            },
            MORE_HINT,
        );
        let mut out = Vec::new();
        run(dataset, &renderer, 2, Cursor::new(script), &mut out, clipboard).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn dataset() -> Dataset {
        Dataset::from_records([
            ("01.11", "Wheat"),
            ("01.12", "Rice"),
            ("01.1", "Cereals"),
            ("02", "Forestry"),
        ])
    }

    #[test]
    fn searches_each_line_and_expands_on_more() {
        let mut clipboard = RecordingClipboard::default();
        let out = session(&dataset(), "01.1\n/more\n/quit\nwheat\n", &mut clipboard);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "codelist - 4 records loaded, type /help for commands");
        assert_eq!(lines[1], "Found 3 records for \"01.1\" (showing 2)");
        assert_eq!(lines[2], "1. <01.1>   Cereals");
        assert_eq!(lines[4], "... and 1 more records (/more to show all)");
        assert_eq!(lines[5], "Found 3 records for \"01.1\"");
        assert_eq!(lines.len(), 9);
        assert!(!out.contains("for \"wheat\""));
    }

    #[test]
    fn empty_and_short_input_are_distinguished() {
        let mut clipboard = RecordingClipboard::default();
        let out = session(&dataset(), "\n  \nw\nzz\n", &mut clipboard);
        let lines: Vec<&str> = out.lines().skip(1).collect();
        assert_eq!(
            lines,
            vec![
                EMPTY_HINT,
                EMPTY_HINT,
                "Type at least 2 characters to search",
                "Nothing found for \"zz\". Try other keywords.",
            ]
        );
    }

    #[test]
    fn copy_uses_the_displayed_position() {
        let mut clipboard = RecordingClipboard::default();
        let out = session(&dataset(), "01.1\n/copy 2\n/copy 3\n/more\n/copy 3\n", &mut clipboard);
        assert_eq!(clipboard.copied, vec!["01.11", "01.12"]);
        assert!(out.contains("Copied 01.11\n"));
        assert!(out.contains("No result #3 to copy\n"));
    }

    #[test]
    fn copy_failures_are_reported() {
        let mut clipboard = RecordingClipboard {
            fail: true,
            ..Default::default()
        };
        let out = session(&dataset(), "wheat\n/copy 1\n/more\n", &mut clipboard);
        assert!(out.contains("Copy failed: Clipboard is not available\n"));
        assert!(out.ends_with("Found 1 records for \"wheat\"\n1. 01.11  <Wheat>\n"));
    }

    #[test]
    fn invalid_utf8_lines_are_skipped() {
        let renderer = Renderer::new(
            MarkStyle::Markers {
                open: "<".to_string(),
                close: ">".to_string(),
            },
            MORE_HINT,
        );
        let mut clipboard = RecordingClipboard::default();
        let mut out = Vec::new();
        let input: &[u8] = b"\xff\xfe milk\r\nwheat\r\n";
        run(&dataset(), &renderer, 2, input, &mut out, &mut clipboard).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().skip(1).collect();
        assert_eq!(
            lines,
            vec![
                "Input is not valid UTF-8, ignored",
                "Found 1 records for \"wheat\"",
                "1. 01.11  <Wheat>",
            ]
        );
    }

    #[test]
    fn more_without_results_has_nothing_to_expand() {
        let mut clipboard = RecordingClipboard::default();
        let out = session(&dataset(), "/more\nzz\n/more\n", &mut clipboard);
        assert_eq!(out.matches("Nothing to expand").count(), 2);
    }
}
