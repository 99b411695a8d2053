// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod common;

use aggregation_core::aggregator::aggregate;
use aggregation_core::equivalence::{equivalent, first_mismatch, Mismatch};
use aggregation_core::result_set::ResultSet;
use common::{dataset, LetterJob, INITIAL, WORD};

#[test]
fn test_aggregate_counts_every_dimension() {
    let lines = dataset(&["apple beta", "alpha apple", "# skipped", ""]);
    let result = aggregate::<LetterJob>(&lines);

    assert_eq!(result.count(WORD, "apple"), 2);
    assert_eq!(result.count(WORD, "beta"), 1);
    assert_eq!(result.count(INITIAL, "a"), 3);
    assert_eq!(result.count(INITIAL, "b"), 1);
    assert_eq!(result.total(WORD), 4);
    assert_eq!(result.records(), 3);
    assert_eq!(result.skipped(), 1);
}

#[test]
fn test_empty_input_keeps_dimensions() {
    let result = aggregate::<LetterJob>(&[]);
    assert!(result.is_empty());
    assert_eq!(result.dimensions().collect::<Vec<_>>(), vec![INITIAL, WORD]);
}

#[test]
fn test_absorb_adds_key_by_key() {
    let mut total = aggregate::<LetterJob>(&dataset(&["gold dust"]));
    total.absorb(aggregate::<LetterJob>(&dataset(&["gold", "# x"])));

    assert_eq!(total.count(WORD, "gold"), 2);
    assert_eq!(total.count(WORD, "dust"), 1);
    assert_eq!(total.records(), 2);
    assert_eq!(total.skipped(), 1);
}

#[test]
fn test_equivalent_results() {
    let a = aggregate::<LetterJob>(&dataset(&["alpha beta", "beta"]));
    let b = aggregate::<LetterJob>(&dataset(&["beta", "beta alpha"]));
    assert!(equivalent(&a, &b));
}

#[test]
fn test_count_mismatch_is_reported() {
    let a = aggregate::<LetterJob>(&dataset(&["alpha beta"]));
    let b = aggregate::<LetterJob>(&dataset(&["alpha alpha"]));

    assert!(!equivalent(&a, &b));
    match first_mismatch(&a, &b) {
        Some(Mismatch::KeySetSize { dimension, .. }) => assert_eq!(dimension, INITIAL),
        other => panic!("unexpected mismatch: {other:?}"),
    }
}

#[test]
fn test_same_keys_different_counts() {
    let mut a = ResultSet::with_dimensions(&[WORD]);
    let mut b = ResultSet::with_dimensions(&[WORD]);
    a.add(WORD, "gold", 3);
    b.add(WORD, "gold", 2);

    assert_eq!(
        first_mismatch(&a, &b),
        Some(Mismatch::Count {
            dimension: WORD,
            key: "gold".to_string(),
            expected: 3,
            actual: 2,
        })
    );
}

#[test]
fn test_missing_dimension_compares_as_empty() {
    let a = ResultSet::with_dimensions(&[WORD, INITIAL]);
    let b = ResultSet::with_dimensions(&[WORD]);
    assert!(equivalent(&a, &b));

    let mut c = ResultSet::with_dimensions(&[WORD]);
    c.increment(INITIAL, "g");
    assert!(!equivalent(&a, &c));
}

#[test]
fn test_accounting_is_not_compared() {
    let a = aggregate::<LetterJob>(&dataset(&["gold", "# x"]));
    let b = aggregate::<LetterJob>(&dataset(&["gold"]));
    assert!(equivalent(&a, &b));
}
