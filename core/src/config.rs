// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::thread;

/// Tuning knobs shared by the concurrent strategies.
/// None of them affects the computed counts, only throughput.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Pool size for Worker-Pool-Chunked, producer count for Mutex-Reduce
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Records per chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Work queue / result channel capacity (0 = synchronous handoff)
    #[serde(default)]
    pub queue_capacity: usize,
    /// Reducer tasks draining the partial queue in Mutex-Reduce
    #[serde(default = "default_reducers")]
    pub reducers: usize,
}

fn default_workers() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

fn default_chunk_size() -> usize {
    500
}

fn default_reducers() -> usize {
    10
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            chunk_size: default_chunk_size(),
            queue_capacity: 0,
            reducers: default_reducers(),
        }
    }
}

impl StrategyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.reducers == 0 {
            return Err(ConfigError::ZeroReducers);
        }
        Ok(())
    }

    /// tokio channels need at least one slot; 0 becomes a single-slot handoff
    pub fn channel_capacity(&self) -> usize {
        self.queue_capacity.max(1)
    }
}
