// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::result_set::{Dimension, FrequencyMap, ResultSet};
use std::collections::BTreeSet;
use std::fmt;

/// First difference found between an expected and an actual result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    KeySetSize {
        dimension: Dimension,
        expected: usize,
        actual: usize,
    },
    Count {
        dimension: Dimension,
        key: String,
        expected: u64,
        actual: u64,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::KeySetSize {
                dimension,
                expected,
                actual,
            } => write!(
                f,
                "{} has {} distinct keys, expected {}",
                dimension, actual, expected
            ),
            Mismatch::Count {
                dimension,
                key,
                expected,
                actual,
            } => write!(
                f,
                "{}[{}] = {}, expected {}",
                dimension, key, actual, expected
            ),
        }
    }
}

/// Exact key/count equality across all dimensions
pub fn equivalent(a: &ResultSet, b: &ResultSet) -> bool {
    first_mismatch(a, b).is_none()
}

/// Compares every dimension present on either side; a dimension missing on
/// one side compares as an empty map. Record accounting is not compared.
pub fn first_mismatch(expected: &ResultSet, actual: &ResultSet) -> Option<Mismatch> {
    let empty = FrequencyMap::new();
    let dimensions: BTreeSet<Dimension> = expected.dimensions().chain(actual.dimensions()).collect();

    for dimension in dimensions {
        let expected_map = expected.get(dimension).unwrap_or(&empty);
        let actual_map = actual.get(dimension).unwrap_or(&empty);

        if expected_map.len() != actual_map.len() {
            return Some(Mismatch::KeySetSize {
                dimension,
                expected: expected_map.len(),
                actual: actual_map.len(),
            });
        }

        for (key, &count) in expected_map {
            let other = actual_map.get(key).copied().unwrap_or(0);
            if other != count {
                return Some(Mismatch::Count {
                    dimension,
                    key: key.clone(),
                    expected: count,
                    actual: other,
                });
            }
        }
    }

    None
}
