// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod cli;
mod config;
mod report;
mod workload;

use aggregation_core::harness::Benchmark;
use aggregation_log_analysis::LogAnalysis;
use aggregation_word_count::WordCount;
use clap::Parser;
use cli::{Cli, Command};
use config::BenchConfig;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let start_time = Instant::now();

    // Everything is validated before any data is generated
    let config = BenchConfig::resolve(&cli)?;
    let benchmark = Benchmark::new(
        config.trials,
        config.strategies.iter().copied(),
        config.strategy.clone(),
    )?;
    if let Command::Logs(_) = cli.command {
        config.logs.validate()?;
    }

    match &cli.command {
        Command::Words(_) => {
            println!("=== WORD COUNT ===");
            config.print_summary(&cli.command);

            let mut source = workload::word_source(config.words.clone());
            let report = benchmark.run::<WordCount, _>(&mut source).await?;
            report::print_benchmark(&report);
        }
        Command::Logs(args) => {
            println!("=== LOG ANALYSIS ===");
            config.print_summary(&cli.command);

            let mut source = workload::log_source(config.logs.clone());
            let report = benchmark.run::<LogAnalysis, _>(&mut source).await?;
            report::print_benchmark(&report);

            if args.per_file {
                info!(files = config.logs.files, "starting file-level comparison");
                let trials = workload::compare_file_level(&config.logs, config.trials).await?;
                report::print_file_level(&trials);
            }
        }
    }

    println!("\nTotal time: {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}
