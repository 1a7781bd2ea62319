mod cli;
mod clipboard;
mod config;
mod logging;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing::info;

use codelist_lookup::dataset::convert::{DEFAULT_INPUT, DEFAULT_OUTPUT};
use codelist_lookup::dataset::convert_tsv_to_json;
use codelist_lookup::{Dataset, Mode, classify, search};

use crate::cli::interactive::{self, MORE_HINT};
use crate::cli::render::{MarkStyle, Renderer, outcome_json};
use crate::clipboard::{ClipboardService, CopyTarget};
use crate::config::{AppConfig, CliOverrides, ColorChoice};
use crate::logging::{DEFAULT_LOG_LEVEL, init_logging};

const PREVIEW_NAME_CHARS: usize = 50;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "codelist",
    version,
    about = "Look up classification codes by code prefix or by name"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Dataset file: tab-separated table or JSON produced by `convert`
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Number of results shown before expanding
    #[arg(long, global = true)]
    limit: Option<usize>,

    /// Highlight with terminal colors
    #[arg(long, value_enum, global = true)]
    color: Option<ColorChoice>,

    /// Log level (error,warn,info,debug,trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            dataset: self.dataset.clone(),
            display_limit: self.limit,
            color: self.color,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Run a single search
    Search {
        /// Query words; put `--` first for a query starting with `-`
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Show every match instead of the first page
        #[arg(long)]
        all: bool,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,

        /// Copy the code of the N-th shown result to the clipboard. On Linux
        /// the command then waits until something else is copied
        #[arg(long, value_name = "N")]
        copy: Option<usize>,
    },
    /// Print the lookup mode of a query: code, name or empty
    Classify { query: Vec<String> },
    /// Search line by line from standard input (default)
    Interactive,
    /// Convert the tab-separated table into the JSON dataset format
    Convert {
        #[arg(default_value = DEFAULT_INPUT)]
        input: PathBuf,

        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
    },
    /// Show record and section counts of the dataset
    Stats,
}

fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let log_level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("CODELIST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
    init_logging(&log_level, cli.log_file.as_deref(), cli.log_json)?;

    let cfg = AppConfig::from_cli(&cli)?;
    info!(?cfg, "app config");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command.clone().unwrap_or(Command::Interactive) {
        Command::Search {
            query,
            all,
            json,
            copy,
        } => {
            let query = query.join(" ");
            match copy {
                Some(n) => {
                    let mut clipboard = ClipboardService::holding();
                    run_search(&cfg, &query, all, json, Some((n, &mut clipboard as &mut dyn CopyTarget)), &mut out)
                }
                None => run_search(&cfg, &query, all, json, None, &mut out),
            }
        }
        Command::Classify { query } => {
            let label = classify(&query.join(" ")).map_or("empty", Mode::as_str);
            writeln!(out, "{label}")?;
            Ok(())
        }
        Command::Interactive => {
            let dataset = load_dataset(&cfg)?;
            let renderer = Renderer::new(MarkStyle::from_config(&cfg), MORE_HINT);
            let mut clipboard = ClipboardService::new();
            interactive::run(
                &dataset,
                &renderer,
                cfg.display_limit,
                io::stdin().lock(),
                &mut out,
                &mut clipboard,
            )
        }
        Command::Convert { input, output } => run_convert(&input, &output, &mut out),
        Command::Stats => run_stats(&cfg, &mut out),
    }
}

fn load_dataset(cfg: &AppConfig) -> Result<Dataset> {
    let path = cfg.dataset.as_deref().context(
        "no dataset configured; pass --dataset, set CODELIST_DATASET \
         or put data.json / okpd_table.tsv in the current directory",
    )?;
    Dataset::load(path).with_context(|| format!("load dataset {}", path.display()))
}

fn run_search<W: Write>(
    cfg: &AppConfig,
    query: &str,
    all: bool,
    json: bool,
    copy: Option<(usize, &mut dyn CopyTarget)>,
    out: &mut W,
) -> Result<()> {
    let dataset = load_dataset(cfg)?;
    let outcome = search(query, &dataset).with_display_limit(cfg.display_limit);

    if json {
        serde_json::to_writer_pretty(&mut *out, &outcome_json(&outcome, all))?;
        writeln!(out)?;
    } else {
        let renderer = Renderer::new(MarkStyle::from_config(cfg), "use --all to show all");
        renderer.write_outcome(out, &outcome, all)?;
    }

    if let Some((n, clipboard)) = copy {
        let code = outcome
            .results()
            .and_then(|r| r.view(all).get(n.saturating_sub(1)))
            .filter(|_| n > 0)
            .map(|record| record.code())
            .with_context(|| format!("no result #{n} to copy"))?;
        out.flush()?;
        if clipboard.holds_until_replaced() {
            eprintln!("Copied {code}; keeping it on the clipboard until something else is copied");
        }
        clipboard
            .copy_text(code)
            .with_context(|| format!("copy {code}"))?;
        if !clipboard.holds_until_replaced() {
            eprintln!("Copied {code}");
        }
    }
    Ok(())
}

fn run_convert<W: Write>(input: &Path, output: &Path, out: &mut W) -> Result<()> {
    writeln!(out, "Converting {} -> {}", input.display(), output.display())?;
    let summary = convert_tsv_to_json(input, output)
        .with_context(|| format!("convert {}", input.display()))?;

    writeln!(out, "Lines processed: {}", summary.report.lines_read)?;
    for skipped in &summary.report.skipped {
        writeln!(
            out,
            "Skipped line {}: {} ({:?})",
            skipped.line, skipped.reason, skipped.content
        )?;
    }
    writeln!(out, "Records written: {}", summary.report.loaded)?;
    writeln!(
        out,
        "Generated at {}",
        summary.generated_at.format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(out, "Preview:")?;
    for (i, record) in summary.preview.iter().enumerate() {
        let name = record.name();
        let preview = match name.char_indices().nth(PREVIEW_NAME_CHARS) {
            Some((cut, _)) => format!("{}...", &name[..cut]),
            None => name.to_string(),
        };
        writeln!(out, "  {}. {:12} -> {}", i + 1, record.code(), preview)?;
    }
    Ok(())
}

fn run_stats<W: Write>(cfg: &AppConfig, out: &mut W) -> Result<()> {
    let dataset = load_dataset(cfg)?;
    let sections = dataset.sections();
    if let Some(path) = &cfg.dataset {
        writeln!(out, "Dataset: {}", path.display())?;
    }
    writeln!(out, "Records: {}", dataset.len())?;
    writeln!(out, "Sections: {}", sections.len())?;
    for (section, count) in sections {
        let label = if section.is_empty() {
            "--".to_string()
        } else {
            section
        };
        writeln!(out, "  {label:>2}  {count}")?;
    }
    Ok(())
}
