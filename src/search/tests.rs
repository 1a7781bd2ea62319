use super::*;
use crate::dataset::Record;
use crate::query::Mode;

fn sample() -> Dataset {
    Dataset::from_records([
        ("10", "Food products"),
        ("100", "Meat"),
        ("20", "Chemicals"),
        ("1000", "Processed meat"),
        ("10.82.22", "Milk chocolate bar"),
        ("10.82.23", "Chocolate juice"),
    ])
}

fn codes<'a>(records: &[&'a Record]) -> Vec<&'a str> {
    records.iter().map(|r| r.code()).collect()
}

#[test]
fn short_queries_are_not_searched() {
    let dataset = sample();
    for query in ["", " ", "1", " m ", "\t\n"] {
        assert_eq!(search(query, &dataset), SearchOutcome::NotSearched, "{query:?}");
    }
}

#[test]
fn searched_queries_without_hits_report_no_matches() {
    let dataset = sample();
    assert_eq!(
        search("  zebra ", &dataset),
        SearchOutcome::NoMatches {
            query: "zebra".to_string()
        }
    );
    assert_eq!(
        search("99", &dataset),
        SearchOutcome::NoMatches {
            query: "99".to_string()
        }
    );
}

#[test]
fn code_search_ranks_exact_then_shorter() {
    let dataset = sample();
    let outcome = search("10", &dataset);
    let results = outcome.results().unwrap();
    assert_eq!(results.mode(), Mode::Code);
    assert_eq!(
        codes(results.all()),
        vec!["10", "100", "1000", "10.82.22", "10.82.23"]
    );
}

#[test]
fn name_search_is_conjunctive() {
    let dataset = sample();
    let outcome = search("choc bar", &dataset);
    assert_eq!(codes(outcome.results().unwrap().all()), vec!["10.82.22"]);
    assert!(matches!(
        search("choc juice milk", &dataset),
        SearchOutcome::NoMatches { .. }
    ));
}

#[test]
fn name_search_ranks_prefix_then_shorter() {
    let dataset = Dataset::from_records([("1", "Apple pie"), ("2", "Apple"), ("3", "Pineapple")]);
    let outcome = search("apple", &dataset);
    let names: Vec<&str> = outcome
        .results()
        .unwrap()
        .all()
        .iter()
        .map(|r| r.name())
        .collect();
    assert_eq!(names, vec!["Apple", "Apple pie", "Pineapple"]);
}

#[test]
fn repeated_searches_are_identical() {
    let dataset = sample();
    let first = search("meat", &dataset);
    let second = search("meat", &dataset);
    assert_eq!(first, second);
    assert_eq!(first.total(), 2);
}

#[test]
fn pattern_characters_never_fail() {
    let dataset = Dataset::from_records([("1", "C++ (legacy) [x]*"), ("2", "plain")]);
    let outcome = search("c++ (legacy) [x]*", &dataset);
    assert_eq!(outcome.total(), 1);
    assert!(matches!(search("\\d+$", &dataset), SearchOutcome::NoMatches { .. }));
}

#[test]
fn large_result_sets_truncate_primary_view() {
    let dataset = Dataset::from_records((0..75).map(|i| (format!("77.{i:02}"), "item")));
    let outcome = search("77", &dataset);
    let results = outcome.results().unwrap();
    assert_eq!(results.primary().len(), 50);
    assert_eq!(results.all().len(), 75);
    assert_eq!(&results.all()[..50], results.primary());

    let outcome = outcome.with_display_limit(10);
    assert_eq!(outcome.results().unwrap().primary().len(), 10);
}
