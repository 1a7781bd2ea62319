use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Installs the global subscriber. Logs go to stderr unless `log_file` is
/// given, in which case they are written there without ANSI colors.
pub fn init_logging(level: &str, log_file: Option<&Path>, json: bool) -> Result<()> {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match (log_file, json) {
        (Some(path), json) => {
            let file = Arc::new(
                std::fs::File::create(path)
                    .with_context(|| format!("create log file: {}", path.display()))?,
            );
            let layer = fmt::layer()
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_writer(file);
            if json {
                layer.json().boxed()
            } else {
                layer.boxed()
            }
        }
        (None, true) => fmt::layer().json().with_writer(std::io::stderr).boxed(),
        (None, false) => fmt::layer().with_writer(std::io::stderr).boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
        .context("install tracing subscriber")?;
    info!("logging initialized");
    Ok(())
}
