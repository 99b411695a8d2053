// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::buffered_channel_strategy::BufferedChannelStrategy;
use crate::config::StrategyConfig;
use crate::error::{AggregationError, ParseStrategyError};
use crate::job::AggregationJob;
use crate::mutex_reduce_strategy::MutexReduceStrategy;
use crate::partition::Dataset;
use crate::per_record_strategy::PerRecordStrategy;
use crate::result_set::ResultSet;
use crate::sequential_strategy::SequentialStrategy;
use crate::worker_pool_strategy::WorkerPoolStrategy;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::debug;

/// The interchangeable ways of computing the same aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    Sequential,
    PerRecord,
    WorkerPool,
    BufferedChannel,
    MutexReduce,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::Sequential,
        StrategyKind::PerRecord,
        StrategyKind::WorkerPool,
        StrategyKind::BufferedChannel,
        StrategyKind::MutexReduce,
    ];

    /// Every strategy compared against the sequential baseline
    pub const CONCURRENT: [StrategyKind; 4] = [
        StrategyKind::PerRecord,
        StrategyKind::WorkerPool,
        StrategyKind::BufferedChannel,
        StrategyKind::MutexReduce,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Sequential => "sequential",
            StrategyKind::PerRecord => "per-record",
            StrategyKind::WorkerPool => "worker-pool",
            StrategyKind::BufferedChannel => "buffered-channel",
            StrategyKind::MutexReduce => "mutex-reduce",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StrategyKind::Sequential => "Sequential",
            StrategyKind::PerRecord => "Per-Record Parallel",
            StrategyKind::WorkerPool => "Worker-Pool-Chunked",
            StrategyKind::BufferedChannel => "Buffered-Channel",
            StrategyKind::MutexReduce => "Mutex-Reduce",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| ParseStrategyError(s.to_string()))
    }
}

/// Trait for one way of aggregating a dataset
/// Every implementation must produce a result equivalent to the sequential one
#[async_trait]
pub trait Strategy<J: AggregationJob>: Send + Sync {
    fn kind(&self) -> StrategyKind;

    async fn aggregate(&self, dataset: &Dataset<J::Record>) -> Result<ResultSet, AggregationError>;
}

/// Outcome of one timed strategy run
#[derive(Debug, Clone)]
pub struct StrategyRun {
    pub kind: StrategyKind,
    pub result: ResultSet,
    pub elapsed: Duration,
}

pub fn build<J: AggregationJob>(kind: StrategyKind, config: &StrategyConfig) -> Box<dyn Strategy<J>> {
    match kind {
        StrategyKind::Sequential => Box::new(SequentialStrategy),
        StrategyKind::PerRecord => Box::new(PerRecordStrategy::new(config.channel_capacity())),
        StrategyKind::WorkerPool => Box::new(WorkerPoolStrategy::new(
            config.workers,
            config.chunk_size,
            config.channel_capacity(),
        )),
        StrategyKind::BufferedChannel => Box::new(BufferedChannelStrategy),
        StrategyKind::MutexReduce => Box::new(MutexReduceStrategy::new(
            config.workers,
            config.reducers,
            config.channel_capacity(),
        )),
    }
}

/// Validates the config, then times one strategy over the dataset
pub async fn run<J: AggregationJob>(
    kind: StrategyKind,
    dataset: &Dataset<J::Record>,
    config: &StrategyConfig,
) -> Result<StrategyRun, AggregationError> {
    config.validate()?;
    let strategy = build::<J>(kind, config);

    let start = Instant::now();
    let result = strategy.aggregate(dataset).await?;
    let elapsed = start.elapsed();

    debug!(
        job = J::NAME,
        strategy = %kind,
        records = result.records(),
        skipped = result.skipped(),
        elapsed_ms = elapsed.as_millis() as u64,
        "strategy finished"
    );

    Ok(StrategyRun {
        kind,
        result,
        elapsed,
    })
}
