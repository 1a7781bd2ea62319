use serde::{Deserialize, Serialize};

use super::{DatasetError, Record};

/// One entry of the converter's JSON array.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct JsonEntry {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub section: Option<String>,
}

#[derive(Debug, Serialize)]
struct ExportEntry<'a> {
    code: &'a str,
    name: &'a str,
    section: &'a str,
}

pub(crate) fn parse(input: &str) -> Result<Vec<JsonEntry>, DatasetError> {
    Ok(serde_json::from_str(input)?)
}

pub(crate) fn to_pretty_string(records: &[Record]) -> Result<String, DatasetError> {
    let entries: Vec<ExportEntry<'_>> = records
        .iter()
        .map(|r| ExportEntry {
            code: r.code(),
            name: r.name(),
            section: r.section(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    #[test]
    fn export_keeps_non_ascii_text_readable() {
        let dataset = Dataset::from_records([("01.11", "Пшеница")]);
        let out = to_pretty_string(dataset.records()).unwrap();
        assert!(out.contains("\"name\": \"Пшеница\""));
        assert!(out.contains("\"section\": \"01\""));
        assert!(!out.contains("\"id\""));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            parse("{\"code\": 1}"),
            Err(DatasetError::Json(_))
        ));
    }
}
