// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::MalformedRecord;
use crate::result_set::Dimension;

/// One (dimension, key) pair produced by a tokenizer
pub type Token<'r> = (Dimension, &'r str);

/// Trait that defines a specific counting job
/// Abstracts the job domain from the concurrency strategy
pub trait AggregationJob: Send + Sync + 'static {
    /// One unit of input (a text line, a log line)
    type Record: Send + Sync + 'static;

    /// Short name used in logs
    const NAME: &'static str;

    /// Every dimension this job counts; results start with an empty map for each
    const DIMENSIONS: &'static [Dimension];

    /// Splits one record into the keys to count.
    /// Pure: must not touch shared state.
    fn tokenize(record: &Self::Record) -> Result<Vec<Token<'_>>, MalformedRecord>;
}
