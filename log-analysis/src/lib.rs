// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod entry;
pub mod generator;
pub mod source;

pub use entry::{parse_size, LogEntry, SizeBucket};

use aggregation_core::error::MalformedRecord;
use aggregation_core::job::{AggregationJob, Token};
use aggregation_core::result_set::Dimension;

pub const IP: Dimension = "ip";
pub const METHOD: Dimension = "method";
pub const ENDPOINT: Dimension = "endpoint";
pub const STATUS: Dimension = "status";
pub const SIZE_BUCKET: Dimension = "size_bucket";

/// Access log analysis job - counts requests per IP, method, endpoint,
/// status code and response size bucket
pub struct LogAnalysis;

impl AggregationJob for LogAnalysis {
    type Record = String;

    const NAME: &'static str = "log-analysis";
    const DIMENSIONS: &'static [Dimension] = &[IP, METHOD, ENDPOINT, STATUS, SIZE_BUCKET];

    fn tokenize(line: &String) -> Result<Vec<Token<'_>>, MalformedRecord> {
        let entry = LogEntry::parse(line)?;
        Ok(vec![
            (IP, entry.ip),
            (METHOD, entry.method),
            (ENDPOINT, entry.endpoint),
            (STATUS, entry.status),
            (SIZE_BUCKET, entry.size_bucket().as_str()),
        ])
    }
}
