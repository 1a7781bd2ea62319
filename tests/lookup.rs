use std::fs;

use codelist_lookup::{Dataset, DatasetError, Mode, SearchOutcome, classify, highlight, search};
use tempfile::tempdir;

const TABLE: &str = "\
01\tProducts of agriculture, hunting and related services
01.1\tNon-perennial crops
01.11\tCereals (except rice), leguminous crops and oil seeds
01.11.1\tWheat
01.12\tRice, not husked
10.51\tProcessed liquid milk and cream
10.51.1\tMilk and cream, not concentrated
";

fn load() -> Dataset {
    let dir = tempdir().unwrap();
    let path = dir.path().join("okpd_table.tsv");
    fs::write(&path, TABLE).unwrap();
    Dataset::load(&path).unwrap()
}

fn codes(outcome: &SearchOutcome<'_>) -> Vec<String> {
    outcome
        .results()
        .map(|r| r.all().iter().map(|rec| rec.code().to_string()).collect())
        .unwrap_or_default()
}

#[test]
fn code_lookup_from_a_loaded_table() {
    let dataset = load();
    assert_eq!(dataset.len(), 7);

    let outcome = search("01.11", &dataset);
    assert_eq!(codes(&outcome), vec!["01.11", "01.11.1"]);
    assert_eq!(outcome.results().map(|r| r.mode()), Some(Mode::Code));
}

#[test]
fn name_lookup_ranks_prefix_matches_first() {
    let dataset = load();
    let outcome = search("milk", &dataset);
    assert_eq!(codes(&outcome), vec!["10.51.1", "10.51"]);
}

#[test]
fn outcomes_keep_not_searched_apart_from_no_matches() {
    let dataset = load();
    assert!(!search(" 1 ", &dataset).was_searched());
    let outcome = search("barley", &dataset);
    assert!(outcome.was_searched());
    assert_eq!(outcome.total(), 0);
}

#[test]
fn classify_and_highlight_agree_on_mode() {
    assert_eq!(classify("10.51"), Some(Mode::Code));
    assert_eq!(classify("rice"), Some(Mode::Name));
    assert_eq!(classify("r"), None);

    assert_eq!(highlight("10.51.1", "10.51").render_with("[", "]"), "[10.51].1");
    assert_eq!(
        highlight("Rice, not husked", "rice").render_with("[", "]"),
        "[Rice], not husked"
    );
}

#[test]
fn converted_json_loads_back_in_the_same_order() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("okpd_table.tsv");
    let output = dir.path().join("data.json");
    fs::write(&input, TABLE).unwrap();

    codelist_lookup::dataset::convert_tsv_to_json(&input, &output).unwrap();
    let from_json = Dataset::load(&output).unwrap();
    assert_eq!(from_json.records(), load().records());
}

#[test]
fn empty_table_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.tsv");
    fs::write(&path, "\n\n").unwrap();
    assert!(matches!(Dataset::load(&path), Err(DatasetError::Empty)));
}
