// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::aggregator::{accumulate, empty_result};
use crate::completion::CompletionTracker;
use crate::error::AggregationError;
use crate::job::AggregationJob;
use crate::merger::merge;
use crate::partition::Dataset;
use crate::result_set::ResultSet;
use crate::strategy::{Strategy, StrategyKind};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// One spawned task per record, all sending into a result channel of fixed capacity.
/// Logical fan-out is unbounded: a large input means as many pending tasks.
pub struct PerRecordStrategy {
    capacity: usize,
}

impl PerRecordStrategy {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
        }
    }
}

#[async_trait]
impl<J: AggregationJob> Strategy<J> for PerRecordStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::PerRecord
    }

    async fn aggregate(&self, dataset: &Dataset<J::Record>) -> Result<ResultSet, AggregationError> {
        fan_out::<J>(StrategyKind::PerRecord, dataset, self.capacity).await
    }
}

/// Spawns a task per record and merges their one-record partials as they arrive.
/// Shared by Per-Record Parallel and Buffered-Channel, which differ only in `capacity`.
pub(crate) async fn fan_out<J: AggregationJob>(
    kind: StrategyKind,
    dataset: &Dataset<J::Record>,
    capacity: usize,
) -> Result<ResultSet, AggregationError> {
    let (partial_tx, partial_rx) = mpsc::channel(capacity);
    let mut tracker = CompletionTracker::new();

    debug!(strategy = %kind, tasks = dataset.len(), capacity, "spawning per-record tasks");

    for index in 0..dataset.len() {
        let guard = tracker.guard(index);
        let dataset = Arc::clone(dataset);
        let partial_tx = partial_tx.clone();

        tokio::spawn(async move {
            let mut partial = empty_result::<J>();
            accumulate::<J>(&mut partial, &dataset[index]);
            if partial_tx.send(partial).await.is_ok() {
                guard.succeed();
            }
        });
    }
    drop(partial_tx);

    let (result, report) = tokio::join!(merge::<J>(partial_rx), tracker.wait_all());
    report.into_result(kind)?;
    Ok(result)
}
