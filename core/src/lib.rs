// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod aggregator;
pub mod buffered_channel_strategy;
pub mod completion;
pub mod config;
pub mod equivalence;
pub mod error;
pub mod harness;
pub mod job;
pub mod merger;
pub mod mutex_reduce_strategy;
pub mod partition;
pub mod per_record_strategy;
pub mod result_set;
pub mod sequential_strategy;
pub mod strategy;
pub mod work_queue;
pub mod worker_pool_strategy;
