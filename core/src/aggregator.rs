// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::job::AggregationJob;
use crate::result_set::ResultSet;
use tracing::debug;

/// Empty result carrying every dimension of the job
pub fn empty_result<J: AggregationJob>() -> ResultSet {
    ResultSet::with_dimensions(J::DIMENSIONS)
}

/// Partial aggregation over a batch of records
pub fn aggregate<J: AggregationJob>(records: &[J::Record]) -> ResultSet {
    let mut result = empty_result::<J>();
    for record in records {
        accumulate::<J>(&mut result, record);
    }
    result
}

/// Tokenizes one record into `result`; a malformed record is counted and skipped
pub fn accumulate<J: AggregationJob>(result: &mut ResultSet, record: &J::Record) {
    match J::tokenize(record) {
        Ok(tokens) => {
            for (dimension, key) in tokens {
                result.increment(dimension, key);
            }
            result.record_accepted();
        }
        Err(err) => {
            debug!(job = J::NAME, %err, "skipping record");
            result.record_skipped();
        }
    }
}
