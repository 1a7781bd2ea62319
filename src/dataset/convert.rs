//! Converts the tab-separated source table into the JSON dataset format.

use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::{Dataset, DatasetError, LoadReport, Record, json};

pub const DEFAULT_INPUT: &str = "okpd_table.tsv";
pub const DEFAULT_OUTPUT: &str = "data.json";

const PREVIEW_LEN: usize = 3;

#[derive(Debug, Clone)]
pub struct ConvertSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub report: LoadReport,
    pub preview: Vec<Record>,
    pub generated_at: DateTime<Local>,
}

pub fn convert_tsv_to_json(input: &Path, output: &Path) -> Result<ConvertSummary, DatasetError> {
    let content = fs::read_to_string(input).map_err(|source| DatasetError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let (dataset, report) = Dataset::from_tsv_str(&content)?;
    let body = json::to_pretty_string(dataset.records())?;
    fs::write(output, body).map_err(|source| DatasetError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    info!(
        input = %input.display(),
        output = %output.display(),
        records = report.loaded,
        "converted dataset"
    );

    Ok(ConvertSummary {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        preview: dataset.records().iter().take(PREVIEW_LEN).cloned().collect(),
        report,
        generated_at: Local::now(),
    })
}
