//! The reference dataset: an ordered, immutable list of code/name records.
//!
//! Records are loaded once (from the tab-separated source table or from the
//! JSON produced by [`convert`]) and never mutated afterwards. Each record's
//! `id` is its position in the load order.

pub mod convert;
mod error;
mod json;
mod tsv;

use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

pub use convert::{ConvertSummary, convert_tsv_to_json};
pub use error::DatasetError;
pub use tsv::{LoadReport, SkipReason, SkippedLine};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    id: String,
    code: String,
    name: String,
    section: String,
}

impl Record {
    fn new(index: usize, code: String, name: String) -> Self {
        let section = section_of(&code);
        Self {
            id: index.to_string(),
            code,
            name,
            section,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// First two digits of the code, or an empty string when it has fewer.
    pub fn section(&self) -> &str {
        &self.section
    }
}

fn section_of(code: &str) -> String {
    let digits: String = code.chars().filter(|c| c.is_ascii_digit()).take(2).collect();
    if digits.len() == 2 { digits } else { String::new() }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Builds a dataset from `(code, name)` pairs, assigning positional ids.
    pub fn from_records<I, C, N>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, N)>,
        C: Into<String>,
        N: Into<String>,
    {
        let records = pairs
            .into_iter()
            .enumerate()
            .map(|(index, (code, name))| Record::new(index, code.into(), name.into()))
            .collect();
        Self { records }
    }

    /// Loads a dataset file, picking the format by extension: `.json` is read
    /// as converter output, anything else as the tab-separated table.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let content = fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let dataset = if is_json {
            Self::from_json_str(&content)?
        } else {
            let (dataset, report) = Self::from_tsv_str(&content)?;
            info!(
                path = %path.display(),
                lines = report.lines_read,
                skipped = report.skipped.len(),
                "parsed tsv dataset"
            );
            dataset
        };
        info!(path = %path.display(), records = dataset.len(), "dataset loaded");
        Ok(dataset)
    }

    pub fn from_tsv_str(input: &str) -> Result<(Self, LoadReport), DatasetError> {
        let (pairs, report) = tsv::parse(input);
        if pairs.is_empty() {
            return Err(DatasetError::Empty);
        }
        Ok((Self::from_records(pairs), report))
    }

    pub fn from_json_str(input: &str) -> Result<Self, DatasetError> {
        let entries = json::parse(input)?;
        if entries.is_empty() {
            return Err(DatasetError::Empty);
        }
        let records = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let mut record = Record::new(index, entry.code, entry.name);
                if let Some(section) = entry.section {
                    record.section = section;
                }
                record
            })
            .collect();
        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct sections with their record counts, in first-appearance order.
    pub fn sections(&self) -> Vec<(String, usize)> {
        let mut order: Vec<(String, usize)> = Vec::new();
        let mut slots: HashMap<&str, usize> = HashMap::new();
        for record in &self.records {
            match slots.get(record.section.as_str()) {
                Some(&slot) => order[slot].1 += 1,
                None => {
                    slots.insert(&record.section, order.len());
                    order.push((record.section.clone(), 1));
                }
            }
        }
        order
    }
}
