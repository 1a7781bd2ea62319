pub mod interactive;
pub mod render;

use std::io::{self, Write};

pub const EMPTY_HINT: &str = "Type a code or a name to search";

pub fn write_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "<text>     Search by code prefix (e.g. 01.11) or by name words\n/more      Show all results of the last search\n/copy <N>  Copy the code of result N to the clipboard\n/help      Show help\n/quit      Quit"
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    More,
    Copy(usize),
    Quit,
    /// A slash command that could not be used, with the message to show.
    Invalid(String),
}

/// Parses a slash command. Lines that do not start with `/` are queries.
pub fn parse_command(line: &str) -> Option<ReplCommand> {
    let line = line.trim();
    if !line.starts_with('/') {
        return None;
    }
    let mut parts = line.split_whitespace();
    let command = match parts.next().unwrap_or_default() {
        "/help" => ReplCommand::Help,
        "/more" => ReplCommand::More,
        "/quit" | "/exit" => ReplCommand::Quit,
        "/copy" => match parts.next().and_then(|s| s.parse::<usize>().ok()) {
            Some(n) if n > 0 => ReplCommand::Copy(n),
            _ => ReplCommand::Invalid("usage: /copy <N>".to_string()),
        },
        other => ReplCommand::Invalid(format!("unknown command: {other} (try /help)")),
    };
    Some(command)
}
