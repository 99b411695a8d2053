// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::strategy::StrategyKind;
use thiserror::Error;

/// Boxed error returned by external collaborators (input generation, file loading)
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Rejected configuration, detected before any worker starts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("chunk size must be at least 1")]
    ZeroChunkSize,

    #[error("worker count must be at least 1")]
    ZeroWorkers,

    #[error("reducer count must be at least 1")]
    ZeroReducers,

    #[error("trial count must be at least 1")]
    ZeroTrials,
}

/// A record the tokenizer cannot split into the job's dimensions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed record: {reason}")]
pub struct MalformedRecord {
    pub reason: String,
}

impl MalformedRecord {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AggregationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Workers that exited without reporting success (panic or lost channel)
    #[error("{strategy}: {} of {registered} workers failed (ids {failed:?})", .failed.len())]
    WorkersFailed {
        strategy: StrategyKind,
        registered: usize,
        failed: Vec<usize>,
    },
}

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("trial {trial}: baseline run failed: {source}")]
    Baseline {
        trial: usize,
        #[source]
        source: AggregationError,
    },

    #[error("trial {trial}: input unavailable: {source}")]
    Input {
        trial: usize,
        #[source]
        source: BoxError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy '{0}' (expected sequential, per-record, worker-pool, buffered-channel or mutex-reduce)")]
pub struct ParseStrategyError(pub String);
