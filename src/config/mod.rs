use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use codelist_lookup::DEFAULT_DISPLAY_LIMIT;

pub const PROJECT_CONFIG_DIR: &str = ".codelist";

// Files picked up from the working directory when no dataset is configured
const DEFAULT_DATASET_CANDIDATES: [&str; 2] = ["data.json", "okpd_table.tsv"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => atty::is(atty::Stream::Stdout),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightMarkers {
    pub open: String,
    pub close: String,
}

impl Default for HighlightMarkers {
    fn default() -> Self {
        Self {
            open: "[".to_string(),
            close: "]".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dataset: Option<PathBuf>,
    pub display_limit: usize,
    pub color: ColorChoice,
    pub markers: HighlightMarkers,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FileConfig {
    pub dataset: Option<PathBuf>,
    pub display_limit: Option<usize>,
    pub color: Option<ColorChoice>,
    pub highlight: Option<PartialHighlightConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PartialHighlightConfig {
    pub open: Option<String>,
    pub close: Option<String>,
}

/// Values given on the command line; they win over every other source.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub dataset: Option<PathBuf>,
    pub display_limit: Option<usize>,
    pub color: Option<ColorChoice>,
}

impl AppConfig {
    pub fn from_cli(cli: &crate::Cli) -> Result<Self> {
        let project_root = std::env::current_dir().context("resolve current dir")?;

        // Project config overrides the global one
        let project_cfg = load_project_config(&project_root).unwrap_or_default();
        let file_cfg = load_file_config().unwrap_or_default();

        Ok(Self::resolve(
            cli.overrides(),
            project_cfg,
            file_cfg,
            |key| std::env::var(key).ok(),
            project_root,
        ))
    }

    /// Merges every source: CLI, environment, project config, global config,
    /// then built-in defaults.
    pub fn resolve(
        cli: CliOverrides,
        project_cfg: FileConfig,
        file_cfg: FileConfig,
        env: impl Fn(&str) -> Option<String>,
        project_root: PathBuf,
    ) -> Self {
        let dataset = cli
            .dataset
            .or_else(|| env("CODELIST_DATASET").map(PathBuf::from))
            .or(project_cfg.dataset)
            .or(file_cfg.dataset)
            .or_else(|| default_dataset(&project_root));

        let display_limit = cli
            .display_limit
            .or_else(|| {
                env("CODELIST_DISPLAY_LIMIT").and_then(|v| match v.trim().parse::<usize>() {
                    Ok(limit) => Some(limit),
                    Err(e) => {
                        warn!(value = %v, error = %e, "ignoring invalid CODELIST_DISPLAY_LIMIT");
                        None
                    }
                })
            })
            .or(project_cfg.display_limit)
            .or(file_cfg.display_limit)
            .unwrap_or(DEFAULT_DISPLAY_LIMIT);
        let display_limit = if display_limit == 0 {
            warn!("display_limit must be positive; using {DEFAULT_DISPLAY_LIMIT}");
            DEFAULT_DISPLAY_LIMIT
        } else {
            display_limit
        };

        let color = cli
            .color
            .or(project_cfg.color)
            .or(file_cfg.color)
            .unwrap_or_default();

        let markers = {
            let mut markers = HighlightMarkers::default();
            for partial in [&file_cfg.highlight, &project_cfg.highlight]
                .into_iter()
                .flatten()
            {
                if let Some(open) = &partial.open {
                    markers.open = open.clone();
                }
                if let Some(close) = &partial.close {
                    markers.close = close.clone();
                }
            }
            markers
        };

        Self {
            dataset,
            display_limit,
            color,
            markers,
        }
    }
}

fn default_dataset(project_root: &Path) -> Option<PathBuf> {
    DEFAULT_DATASET_CANDIDATES
        .iter()
        .map(|name| project_root.join(name))
        .find(|p| p.is_file())
}

pub fn load_file_config() -> Result<FileConfig> {
    use std::env;

    fn candidate_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Ok(p) = env::var("CODELIST_CONFIG") {
            v.push(PathBuf::from(p));
        }
        if let Ok(xdg_home) = env::var("XDG_CONFIG_HOME") {
            v.push(Path::new(&xdg_home).join("codelist/config.toml"));
        } else if let Some(config_dir) = dirs::config_dir() {
            v.push(config_dir.join("codelist/config.toml"));
        }
        v
    }

    for p in candidate_paths() {
        if p.exists() {
            let s = fs::read_to_string(&p)
                .with_context(|| format!("read config file: {}", p.display()))?;
            match toml::from_str::<FileConfig>(&s) {
                Ok(cfg) => {
                    info!(path=%p.display(), "loaded config file");
                    return Ok(cfg);
                }
                Err(e) => {
                    warn!(path=%p.display(), error=%e.to_string(), "parse config failed");
                    continue;
                }
            }
        }
    }
    Ok(FileConfig::default())
}

/// Load project-specific configuration from .codelist/config.toml
pub fn load_project_config(project_root: &Path) -> Result<FileConfig> {
    let project_config_path = project_root.join(PROJECT_CONFIG_DIR).join("config.toml");

    if project_config_path.exists() {
        let s = fs::read_to_string(&project_config_path).with_context(|| {
            format!(
                "read project config file: {}",
                project_config_path.display()
            )
        })?;
        match toml::from_str::<FileConfig>(&s) {
            Ok(cfg) => {
                info!(path=%project_config_path.display(), "loaded project config file");
                Ok(cfg)
            }
            Err(e) => {
                warn!(path=%project_config_path.display(), error=%e.to_string(), "parse project config failed");
                Ok(FileConfig::default())
            }
        }
    } else {
        Ok(FileConfig::default())
    }
}
