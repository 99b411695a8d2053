// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use aggregation_core::equivalence::first_mismatch;
use aggregation_core::error::BoxError;
use aggregation_log_analysis::generator::{write_log_files, GeneratorError, LogGeneratorConfig};
use aggregation_log_analysis::source::{analyze_files_concurrent, analyze_files_sequential, load_log_files};
use aggregation_word_count::generator::{generate_lines, LineGeneratorConfig};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Fresh random text for every trial
pub fn word_source(config: LineGeneratorConfig) -> impl FnMut(usize) -> Result<Vec<String>, BoxError> {
    let mut rng = rand::rng();
    move |trial| {
        let lines = generate_lines(&mut rng, &config);
        info!(trial, lines = lines.len(), "generated text");
        Ok(lines)
    }
}

/// Rewrites the log files for every trial, then reads them back as records
pub fn log_source(config: LogGeneratorConfig) -> impl FnMut(usize) -> Result<Vec<String>, BoxError> {
    let mut rng = rand::rng();
    move |trial| {
        let paths = write_log_files(&mut rng, &config)?;
        let loaded = load_log_files(&paths);
        if !loaded.failed_files.is_empty() {
            warn!(trial, failed = loaded.failed_files.len(), "some log files could not be read back");
        }
        Ok(loaded.records)
    }
}

/// One trial of the file-level comparison
#[derive(Debug)]
pub struct FileLevelTrial {
    pub trial: usize,
    pub sequential: Duration,
    pub concurrent: Duration,
    pub matched: bool,
    pub failed_files: usize,
}

/// Whole files as the unit of work: one after the other versus one blocking task per file
pub async fn compare_file_level(
    config: &LogGeneratorConfig,
    trials: usize,
) -> Result<Vec<FileLevelTrial>, GeneratorError> {
    let mut rng = rand::rng();
    let mut results = Vec::with_capacity(trials);

    for trial in 1..=trials {
        let paths = write_log_files(&mut rng, config)?;

        let start = Instant::now();
        let sequential = analyze_files_sequential(&paths);
        let sequential_elapsed = start.elapsed();

        let start = Instant::now();
        let concurrent = analyze_files_concurrent(&paths).await;
        let concurrent_elapsed = start.elapsed();

        let mismatch = first_mismatch(&sequential.result, &concurrent.result);
        if let Some(mismatch) = &mismatch {
            warn!(trial, %mismatch, "file-level results differ");
        }

        results.push(FileLevelTrial {
            trial,
            sequential: sequential_elapsed,
            concurrent: concurrent_elapsed,
            matched: mismatch.is_none(),
            failed_files: sequential.failed_files.len().max(concurrent.failed_files.len()),
        });
    }

    Ok(results)
}
