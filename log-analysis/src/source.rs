// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::LogAnalysis;
use aggregation_core::aggregator::{aggregate, empty_result};
use aggregation_core::completion::CompletionTracker;
use aggregation_core::merger::merge;
use aggregation_core::result_set::ResultSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};

#[derive(Debug, Error)]
#[error("failed to read {path}: {source}")]
pub struct SourceError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Every line of one log file. Invalid UTF-8 is replaced with U+FFFD,
/// so a bad byte costs at most its own record, never the file.
pub fn read_log_file(path: &Path) -> Result<Vec<String>, SourceError> {
    let wrap = |source| SourceError {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(wrap)?;

    let mut lines = Vec::new();
    for line in BufReader::new(file).split(b'\n') {
        let mut bytes = line.map_err(wrap)?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        lines.push(String::from_utf8_lossy(&bytes).into_owned());
    }
    Ok(lines)
}

/// Records of every readable file; unreadable files are listed, not fatal
#[derive(Debug, Default)]
pub struct LoadedLogs {
    pub records: Vec<String>,
    pub failed_files: Vec<PathBuf>,
}

pub fn load_log_files(paths: &[PathBuf]) -> LoadedLogs {
    let mut loaded = LoadedLogs::default();
    for path in paths {
        match read_log_file(path) {
            Ok(lines) => loaded.records.extend(lines),
            Err(err) => {
                warn!(%err, "skipping unreadable log file");
                loaded.failed_files.push(path.clone());
            }
        }
    }

    debug!(
        files = paths.len(),
        records = loaded.records.len(),
        failed = loaded.failed_files.len(),
        "log files loaded"
    );
    loaded
}

/// Analysis of a whole file as one unit of work
pub fn analyze_file(path: &Path) -> Result<ResultSet, SourceError> {
    let lines = read_log_file(path)?;
    Ok(aggregate::<LogAnalysis>(&lines))
}

/// Merged result of a file-level run plus the files that could not be read
#[derive(Debug)]
pub struct FileAnalysis {
    pub result: ResultSet,
    pub failed_files: Vec<PathBuf>,
}

/// One file after the other on the calling thread
pub fn analyze_files_sequential(paths: &[PathBuf]) -> FileAnalysis {
    let mut analysis = FileAnalysis {
        result: empty_result::<LogAnalysis>(),
        failed_files: Vec::new(),
    };

    for path in paths {
        match analyze_file(path) {
            Ok(partial) => analysis.result.absorb(partial),
            Err(err) => {
                warn!(%err, "skipping unreadable log file");
                analysis.failed_files.push(path.clone());
            }
        }
    }
    analysis
}

/// One blocking task per file; partials are merged as files finish.
/// A file whose task dies (panic or lost channel) is listed in `failed_files`.
pub async fn analyze_files_concurrent(paths: &[PathBuf]) -> FileAnalysis {
    analyze_concurrently(paths, analyze_file).await
}

async fn analyze_concurrently<F>(paths: &[PathBuf], analyze: F) -> FileAnalysis
where
    F: Fn(&Path) -> Result<ResultSet, SourceError> + Copy + Send + 'static,
{
    let (partial_tx, partial_rx) = mpsc::channel(paths.len().max(1));
    let (failed_tx, mut failed_rx) = mpsc::unbounded_channel::<PathBuf>();
    let mut tracker = CompletionTracker::new();

    for (file_id, path) in paths.iter().enumerate() {
        let guard = tracker.guard(file_id);
        let path = path.clone();
        let partial_tx = partial_tx.clone();
        let failed_tx = failed_tx.clone();

        tokio::task::spawn_blocking(move || {
            match analyze(&path) {
                Ok(partial) => {
                    if partial_tx.blocking_send(partial).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    warn!(%err, "skipping unreadable log file");
                    if failed_tx.send(path).is_err() {
                        return;
                    }
                }
            }
            guard.succeed();
        });
    }
    drop(partial_tx);
    drop(failed_tx);

    let (result, report) = tokio::join!(merge::<LogAnalysis>(partial_rx), tracker.wait_all());

    let mut failed_files = Vec::new();
    while let Some(path) = failed_rx.recv().await {
        failed_files.push(path);
    }
    for file_id in report.failed {
        let path = &paths[file_id];
        warn!(path = %path.display(), "file task failed, its counts are missing");
        failed_files.push(path.clone());
    }
    failed_files.sort();

    FileAnalysis {
        result,
        failed_files,
    }
}
