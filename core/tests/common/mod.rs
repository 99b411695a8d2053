// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(dead_code)]

use aggregation_core::error::MalformedRecord;
use aggregation_core::job::{AggregationJob, Token};
use aggregation_core::partition::Dataset;
use aggregation_core::result_set::Dimension;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const WORD: Dimension = "word";
pub const INITIAL: Dimension = "initial";

/// Counts words and their first letters; lines starting with '#' are malformed
pub struct LetterJob;

impl AggregationJob for LetterJob {
    type Record = String;

    const NAME: &'static str = "letters";
    const DIMENSIONS: &'static [Dimension] = &[WORD, INITIAL];

    fn tokenize(record: &String) -> Result<Vec<Token<'_>>, MalformedRecord> {
        if record.starts_with('#') {
            return Err(MalformedRecord::new("comment line"));
        }
        let mut tokens = Vec::new();
        for word in record.split_whitespace() {
            let first = word.chars().next().map_or(0, char::len_utf8);
            tokens.push((WORD, word));
            tokens.push((INITIAL, &word[..first]));
        }
        Ok(tokens)
    }
}

/// Same tokens as `LetterJob`, but panics on the record "boom"
pub struct FaultyJob;

impl AggregationJob for FaultyJob {
    type Record = String;

    const NAME: &'static str = "faulty";
    const DIMENSIONS: &'static [Dimension] = &[WORD, INITIAL];

    fn tokenize(record: &String) -> Result<Vec<Token<'_>>, MalformedRecord> {
        if record == "boom" {
            panic!("tokenizer blew up");
        }
        LetterJob::tokenize(record)
    }
}

const VOCABULARY: [&str; 8] = ["alpha", "beta", "gamma", "delta", "apple", "bravo", "gold", "dust"];

/// Deterministic lines of random words; roughly one in twenty is malformed
pub fn random_lines(seed: u64, count: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            if rng.random_range(0..20) == 0 {
                return "# comment".to_string();
            }
            let words = rng.random_range(0..6);
            (0..words)
                .map(|_| VOCABULARY[rng.random_range(0..VOCABULARY.len())])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

pub fn dataset(lines: &[&str]) -> Dataset<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

/// Thread name given to the workers of [`worker_runtime`]
pub const WORKER_THREAD_NAME: &str = "agg-worker";

/// Multi-thread runtime whose worker threads are named [`WORKER_THREAD_NAME`].
/// `block_on` keeps running on the calling thread, which is not a worker.
pub fn worker_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .thread_name(WORKER_THREAD_NAME)
        .enable_all()
        .build()
        .unwrap()
}

/// Panics on "boom" only on [`worker_runtime`] worker threads, so the
/// sequential baseline (run inside `block_on`) survives while spawned workers fail
pub struct WorkerOnlyFaultyJob;

impl AggregationJob for WorkerOnlyFaultyJob {
    type Record = String;

    const NAME: &'static str = "worker-faulty";
    const DIMENSIONS: &'static [Dimension] = &[WORD, INITIAL];

    fn tokenize(record: &String) -> Result<Vec<Token<'_>>, MalformedRecord> {
        let on_worker = std::thread::current().name() == Some(WORKER_THREAD_NAME);
        if record == "boom" && on_worker {
            panic!("tokenizer blew up on a worker");
        }
        LetterJob::tokenize(record)
    }
}
