use crate::dataset::Record;
use crate::query::{Mode, clean_code_query, name_words};

/// Filters `records` down to those matching `query` in the given mode,
/// keeping their dataset order.
///
/// Code lookups are prefix matches of the cleaned query against the code.
/// Name lookups require every query word to occur somewhere in the name,
/// ignoring case. A query that reduces to nothing matches nothing.
pub fn find_matches<'a>(mode: Mode, query: &str, records: &'a [Record]) -> Vec<&'a Record> {
    match mode {
        Mode::Code => {
            let clean = clean_code_query(query);
            if clean.is_empty() {
                return Vec::new();
            }
            records
                .iter()
                .filter(|r| r.code().starts_with(&clean))
                .collect()
        }
        Mode::Name => {
            let words = name_words(query);
            if words.is_empty() {
                return Vec::new();
            }
            records
                .iter()
                .filter(|r| {
                    let name = r.name().to_lowercase();
                    words.iter().all(|w| name.contains(w.as_str()))
                })
                .collect()
        }
    }
}
