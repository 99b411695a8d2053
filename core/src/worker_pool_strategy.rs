// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::aggregator::aggregate;
use crate::completion::{CompletionGuard, CompletionTracker};
use crate::error::AggregationError;
use crate::job::AggregationJob;
use crate::merger::merge;
use crate::partition::{partition, Chunk, Dataset};
use crate::result_set::ResultSet;
use crate::strategy::{Strategy, StrategyKind};
use crate::work_queue::{work_queue, SharedReceiver};
use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Fixed pool of workers pulling chunks from a bounded queue.
/// The only strategy whose memory use does not grow with the input.
pub struct WorkerPoolStrategy {
    workers: usize,
    chunk_size: usize,
    capacity: usize,
}

impl WorkerPoolStrategy {
    pub fn new(workers: usize, chunk_size: usize, capacity: usize) -> Self {
        Self {
            workers,
            chunk_size,
            capacity: capacity.max(1),
        }
    }
}

#[async_trait]
impl<J: AggregationJob> Strategy<J> for WorkerPoolStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::WorkerPool
    }

    async fn aggregate(&self, dataset: &Dataset<J::Record>) -> Result<ResultSet, AggregationError> {
        let chunks = partition(dataset, self.chunk_size)?;
        let (work_tx, work_rx) = work_queue::<Chunk<J::Record>>(self.capacity);
        let (partial_tx, partial_rx) = mpsc::channel::<ResultSet>(self.capacity);
        let mut tracker = CompletionTracker::new();

        debug!(
            workers = self.workers,
            chunks = chunks.len(),
            chunk_size = self.chunk_size,
            "starting worker pool"
        );

        for worker_id in 0..self.workers {
            let guard = tracker.guard(worker_id);
            tokio::spawn(pool_worker::<J>(guard, work_rx.clone(), partial_tx.clone()));
        }
        // Only the workers may hold these, otherwise the queues never close
        drop(work_rx);
        drop(partial_tx);

        let feed = async move {
            for chunk in chunks {
                if work_tx.send(chunk).await.is_err() {
                    warn!("every pool worker is gone, stopping chunk feed");
                    break;
                }
            }
        };

        let (_, result, report) = tokio::join!(feed, merge::<J>(partial_rx), tracker.wait_all());
        report.into_result(StrategyKind::WorkerPool)?;
        Ok(result)
    }
}

async fn pool_worker<J: AggregationJob>(
    guard: CompletionGuard,
    work_rx: SharedReceiver<Chunk<J::Record>>,
    partial_tx: mpsc::Sender<ResultSet>,
) {
    let mut processed = 0usize;
    while let Some(chunk) = work_rx.recv().await {
        let partial = aggregate::<J>(chunk.records());
        if partial_tx.send(partial).await.is_err() {
            return;
        }
        processed += 1;
    }

    debug!(worker_id = guard.worker_id(), chunks = processed, "pool worker drained queue");
    guard.succeed();
}
