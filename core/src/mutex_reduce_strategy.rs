// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::aggregator::{accumulate, empty_result};
use crate::completion::{CompletionGuard, CompletionTracker};
use crate::error::AggregationError;
use crate::job::AggregationJob;
use crate::merger::merge_locked;
use crate::partition::Dataset;
use crate::result_set::ResultSet;
use crate::strategy::{Strategy, StrategyKind};
use crate::work_queue::{work_queue, SharedReceiver};
use async_trait::async_trait;
use std::mem;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc::Sender;
use tracing::{debug, warn};

/// Producers emit one-record partials into a shared queue; several reducers
/// drain it into a single accumulator guarded by a mutex.
pub struct MutexReduceStrategy {
    producers: usize,
    reducers: usize,
    capacity: usize,
}

impl MutexReduceStrategy {
    pub fn new(producers: usize, reducers: usize, capacity: usize) -> Self {
        Self {
            producers,
            reducers,
            capacity: capacity.max(1),
        }
    }
}

#[async_trait]
impl<J: AggregationJob> Strategy<J> for MutexReduceStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::MutexReduce
    }

    async fn aggregate(&self, dataset: &Dataset<J::Record>) -> Result<ResultSet, AggregationError> {
        let (index_tx, index_rx) = work_queue::<usize>(self.capacity);
        let (partial_tx, partial_rx) = work_queue::<ResultSet>(self.capacity);
        let accumulator = Arc::new(Mutex::new(empty_result::<J>()));
        let mut tracker = CompletionTracker::new();

        debug!(
            producers = self.producers,
            reducers = self.reducers,
            records = dataset.len(),
            "starting mutex reduce"
        );

        for producer_id in 0..self.producers {
            let guard = tracker.guard(producer_id);
            tokio::spawn(producer::<J>(
                guard,
                Arc::clone(dataset),
                index_rx.clone(),
                partial_tx.clone(),
            ));
        }
        for reducer_id in 0..self.reducers {
            let guard = tracker.guard(self.producers + reducer_id);
            tokio::spawn(reducer(guard, partial_rx.clone(), Arc::clone(&accumulator)));
        }
        drop(index_rx);
        drop(partial_tx);
        drop(partial_rx);

        let len = dataset.len();
        let feed = async move {
            for index in 0..len {
                if index_tx.send(index).await.is_err() {
                    warn!("every producer is gone, stopping record feed");
                    break;
                }
            }
        };

        let (_, report) = tokio::join!(feed, tracker.wait_all());
        report.into_result(StrategyKind::MutexReduce)?;

        // Reducers have all reported, but their Arc clones may not be released yet
        let result = mem::take(&mut *accumulator.lock().unwrap_or_else(PoisonError::into_inner));
        Ok(result)
    }
}

async fn producer<J: AggregationJob>(
    guard: CompletionGuard,
    dataset: Dataset<J::Record>,
    index_rx: SharedReceiver<usize>,
    partial_tx: Sender<ResultSet>,
) {
    while let Some(index) = index_rx.recv().await {
        let mut partial = empty_result::<J>();
        accumulate::<J>(&mut partial, &dataset[index]);
        if partial_tx.send(partial).await.is_err() {
            return;
        }
    }
    guard.succeed();
}

async fn reducer(
    guard: CompletionGuard,
    partial_rx: SharedReceiver<ResultSet>,
    accumulator: Arc<Mutex<ResultSet>>,
) {
    let mut applied = 0usize;
    while let Some(partial) = partial_rx.recv().await {
        merge_locked(&accumulator, partial);
        applied += 1;
    }

    debug!(worker_id = guard.worker_id(), partials = applied, "reducer drained queue");
    guard.succeed();
}
