// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod generator;

use aggregation_core::error::MalformedRecord;
use aggregation_core::job::{AggregationJob, Token};
use aggregation_core::result_set::Dimension;

pub const WORD: Dimension = "word";

/// Word count job - counts whitespace-separated words across text lines
pub struct WordCount;

impl AggregationJob for WordCount {
    type Record = String;

    const NAME: &'static str = "word-count";
    const DIMENSIONS: &'static [Dimension] = &[WORD];

    /// Any line is well-formed; a blank line simply yields no words
    fn tokenize(line: &String) -> Result<Vec<Token<'_>>, MalformedRecord> {
        Ok(line.split_whitespace().map(|word| (WORD, word)).collect())
    }
}
