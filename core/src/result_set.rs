// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::collections::{BTreeMap, HashMap};

/// Name of a counted dimension (e.g. "word", "ip", "status")
pub type Dimension = &'static str;

/// Occurrence count per key for one dimension
pub type FrequencyMap = HashMap<String, u64>;

/// Frequency maps for every dimension of a job, plus record accounting.
///
/// The same type is used for the partial result of one chunk and for the
/// final result of a whole run: merging is just [`ResultSet::absorb`].
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    maps: BTreeMap<Dimension, FrequencyMap>,
    records: u64,
    skipped: u64,
}

impl ResultSet {
    /// Empty result with one (empty) frequency map per dimension
    pub fn with_dimensions(dimensions: &[Dimension]) -> Self {
        Self {
            maps: dimensions
                .iter()
                .map(|dimension| (*dimension, FrequencyMap::new()))
                .collect(),
            records: 0,
            skipped: 0,
        }
    }

    pub fn increment(&mut self, dimension: Dimension, key: &str) {
        self.add(dimension, key, 1);
    }

    /// Adds `count` to a borrowed key, allocating only on first sight
    pub fn add(&mut self, dimension: Dimension, key: &str, count: u64) {
        let map = self.maps.entry(dimension).or_default();
        match map.get_mut(key) {
            Some(total) => *total += count,
            None => {
                map.insert(key.to_owned(), count);
            }
        }
    }

    /// Adds `count` to an owned key
    pub fn add_entry(&mut self, dimension: Dimension, key: String, count: u64) {
        *self
            .maps
            .entry(dimension)
            .or_default()
            .entry(key)
            .or_insert(0) += count;
    }

    /// Folds another result into this one, dimension by dimension, key by key
    pub fn absorb(&mut self, other: ResultSet) {
        self.add_accounting(other.records, other.skipped);
        for (dimension, map) in other.maps {
            let target = self.maps.entry(dimension).or_default();
            if target.is_empty() {
                *target = map;
                continue;
            }
            for (key, count) in map {
                *target.entry(key).or_insert(0) += count;
            }
        }
    }

    /// Consumes the result into `(dimension, key, count)` triples
    pub fn into_entries(self) -> impl Iterator<Item = (Dimension, String, u64)> {
        self.maps.into_iter().flat_map(|(dimension, map)| {
            map.into_iter()
                .map(move |(key, count)| (dimension, key, count))
        })
    }

    pub fn record_accepted(&mut self) {
        self.records += 1;
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn add_accounting(&mut self, records: u64, skipped: u64) {
        self.records += records;
        self.skipped += skipped;
    }

    pub fn get(&self, dimension: &str) -> Option<&FrequencyMap> {
        self.maps.get(dimension)
    }

    /// Count for one key, zero if never observed
    pub fn count(&self, dimension: &str, key: &str) -> u64 {
        self.get(dimension)
            .and_then(|map| map.get(key))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of all counts of one dimension
    pub fn total(&self, dimension: &str) -> u64 {
        self.get(dimension)
            .map(|map| map.values().sum())
            .unwrap_or(0)
    }

    pub fn dimensions(&self) -> impl Iterator<Item = Dimension> + '_ {
        self.maps.keys().copied()
    }

    /// Records tokenized successfully
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Malformed records that were skipped
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// True when no dimension holds any key
    pub fn is_empty(&self) -> bool {
        self.maps.values().all(HashMap::is_empty)
    }
}
