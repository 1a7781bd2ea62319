use crate::dataset::Record;
use crate::query::{Mode, clean_code_query};

/// Orders matched records for display. The sort is stable, so records that
/// rank equal keep their incoming order.
///
/// Code lookups put an exact code match first, then shorter codes before
/// longer ones. Name lookups put names starting with the whole query first,
/// then shorter names before longer ones.
pub fn rank<'a>(mut matches: Vec<&'a Record>, mode: Mode, query: &str) -> Vec<&'a Record> {
    let query = query.trim();
    match mode {
        Mode::Code => {
            let clean = clean_code_query(query);
            matches.sort_by_key(|r| (r.code() != clean, r.code().chars().count()));
            matches
        }
        Mode::Name => {
            let prefix = query.to_lowercase();
            let mut keyed: Vec<((bool, usize), &'a Record)> = matches
                .into_iter()
                .map(|r| {
                    let name = r.name().to_lowercase();
                    ((!name.starts_with(&prefix), name.chars().count()), r)
                })
                .collect();
            keyed.sort_by_key(|(key, _)| *key);
            keyed.into_iter().map(|(_, r)| r).collect()
        }
    }
}
