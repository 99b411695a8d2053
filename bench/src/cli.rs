// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use aggregation_core::strategy::StrategyKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Compares sequential and concurrent aggregation strategies on generated data
#[derive(Parser, Debug)]
#[command(name = "aggregation-bench")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON configuration file (defaults to bench.json when present)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of trials to average over
    #[arg(short, long, global = true)]
    pub trials: Option<usize>,

    /// Concurrent strategies to compare, comma separated (e.g. worker-pool,mutex-reduce)
    #[arg(short, long, global = true, value_delimiter = ',', value_name = "LIST")]
    pub strategies: Option<Vec<StrategyKind>>,

    /// Worker pool size / producer count
    #[arg(long, global = true)]
    pub workers: Option<usize>,

    /// Records per chunk for the worker pool
    #[arg(long, global = true)]
    pub chunk_size: Option<usize>,

    /// Queue and channel capacity (0 = synchronous handoff)
    #[arg(long, global = true)]
    pub queue_capacity: Option<usize>,

    /// Reducer tasks for mutex-reduce
    #[arg(long, global = true)]
    pub reducers: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Count words in randomly generated text
    Words(WordsArgs),
    /// Analyze randomly generated access log files
    Logs(LogsArgs),
}

#[derive(Args, Debug)]
pub struct WordsArgs {
    /// Lines generated per trial
    #[arg(long)]
    pub lines: Option<usize>,

    /// Words per generated line
    #[arg(long)]
    pub words_per_line: Option<usize>,
}

#[derive(Args, Debug)]
pub struct LogsArgs {
    /// Log files generated per trial
    #[arg(long)]
    pub files: Option<usize>,

    /// Lines per log file
    #[arg(long)]
    pub lines_per_file: Option<usize>,

    /// Directory the log files are written to
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Also compare sequential and one-task-per-file analysis
    #[arg(long)]
    pub per_file: bool,
}
