// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::aggregator::empty_result;
use crate::job::AggregationJob;
use crate::result_set::ResultSet;
use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc::Receiver;
use tracing::debug;

/// Absorbs partial results until every producer has dropped its sender.
/// The number of partials is unknown up front: one per chunk, per record,
/// or a single one.
pub async fn merge<J: AggregationJob>(mut partials: Receiver<ResultSet>) -> ResultSet {
    let mut total = empty_result::<J>();
    let mut merged = 0usize;

    while let Some(partial) = partials.recv().await {
        total.absorb(partial);
        merged += 1;
    }

    debug!(job = J::NAME, partials = merged, "merge complete");
    total
}

/// Applies one partial to a shared accumulator, locking once per key update.
/// A poisoned lock is recovered: every critical section is a single addition.
pub fn merge_locked(accumulator: &Mutex<ResultSet>, partial: ResultSet) {
    let (records, skipped) = (partial.records(), partial.skipped());

    for (dimension, key, count) in partial.into_entries() {
        accumulator
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .add_entry(dimension, key, count);
    }

    accumulator
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .add_accounting(records, skipped);
}
