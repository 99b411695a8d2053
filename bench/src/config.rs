// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::cli::{Cli, Command};
use aggregation_core::config::StrategyConfig;
use aggregation_core::strategy::StrategyKind;
use aggregation_log_analysis::generator::LogGeneratorConfig;
use aggregation_word_count::generator::LineGeneratorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "bench.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    #[serde(default = "default_trials")]
    pub trials: usize,
    /// Compared against the sequential baseline
    #[serde(default = "default_strategies")]
    pub strategies: Vec<StrategyKind>,
    #[serde(default)]
    pub strategy: StrategyConfig,
    #[serde(default)]
    pub words: LineGeneratorConfig,
    #[serde(default)]
    pub logs: LogGeneratorConfig,
}

fn default_trials() -> usize {
    5
}

fn default_strategies() -> Vec<StrategyKind> {
    StrategyKind::CONCURRENT.to_vec()
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            trials: default_trials(),
            strategies: default_strategies(),
            strategy: StrategyConfig::default(),
            words: LineGeneratorConfig::default(),
            logs: LogGeneratorConfig::default(),
        }
    }
}

impl BenchConfig {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Explicit `--config` must exist; the default file is optional
    pub fn resolve(cli: &Cli) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::load(Path::new(DEFAULT_CONFIG_PATH))?
            }
            None => Self::default(),
        };
        config.apply_overrides(cli);
        Ok(config)
    }

    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(trials) = cli.trials {
            self.trials = trials;
        }
        if let Some(strategies) = &cli.strategies {
            self.strategies = strategies.clone();
        }
        if let Some(workers) = cli.workers {
            self.strategy.workers = workers;
        }
        if let Some(chunk_size) = cli.chunk_size {
            self.strategy.chunk_size = chunk_size;
        }
        if let Some(queue_capacity) = cli.queue_capacity {
            self.strategy.queue_capacity = queue_capacity;
        }
        if let Some(reducers) = cli.reducers {
            self.strategy.reducers = reducers;
        }

        match &cli.command {
            Command::Words(args) => {
                if let Some(lines) = args.lines {
                    self.words.lines = lines;
                }
                if let Some(words_per_line) = args.words_per_line {
                    self.words.words_per_line = words_per_line;
                }
            }
            Command::Logs(args) => {
                if let Some(files) = args.files {
                    self.logs.files = files;
                }
                if let Some(lines_per_file) = args.lines_per_file {
                    self.logs.lines_per_file = lines_per_file;
                }
                if let Some(output_dir) = &args.output_dir {
                    self.logs.output_dir = output_dir.clone();
                }
            }
        }
    }

    pub fn print_summary(&self, command: &Command) {
        println!("Configuration:");
        println!("  Trials: {}", self.trials);
        let strategies: Vec<&str> = self.strategies.iter().map(|s| s.name()).collect();
        println!("  Strategies: sequential (baseline), {}", strategies.join(", "));
        println!("  Workers: {}", self.strategy.workers);
        println!("  Chunk size: {}", self.strategy.chunk_size);
        println!("  Queue capacity: {}", self.strategy.queue_capacity);
        println!("  Reducers: {}", self.strategy.reducers);
        match command {
            Command::Words(_) => {
                println!("  Lines: {}", self.words.lines);
                println!("  Words per line: {}", self.words.words_per_line);
                println!("  Word length: {}", self.words.word_length);
            }
            Command::Logs(_) => {
                println!("  Files: {}", self.logs.files);
                println!("  Lines per file: {}", self.logs.lines_per_file);
                println!("  Distinct IPs: {}", self.logs.distinct_ips);
                println!("  Distinct endpoints: {}", self.logs.distinct_endpoints);
                println!("  Output dir: {}", self.logs.output_dir.display());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: BenchConfig = serde_json::from_str(
            r#"{ "trials": 2, "strategy": { "workers": 3 }, "logs": { "files": 4 } }"#,
        )
        .unwrap();

        assert_eq!(config.trials, 2);
        assert_eq!(config.strategies, StrategyKind::CONCURRENT.to_vec());
        assert_eq!(config.strategy.workers, 3);
        assert_eq!(config.strategy.chunk_size, 500);
        assert_eq!(config.logs.files, 4);
        assert_eq!(config.logs.lines_per_file, 10_000);
        assert_eq!(config.words.word_length, 3);
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let cli = Cli::parse_from([
            "aggregation-bench",
            "--trials",
            "9",
            "--strategies",
            "worker-pool,per-record",
            "--chunk-size",
            "7",
            "logs",
            "--files",
            "2",
            "--per-file",
        ]);
        let mut config = BenchConfig::default();
        config.apply_overrides(&cli);

        assert_eq!(config.trials, 9);
        assert_eq!(
            config.strategies,
            vec![StrategyKind::WorkerPool, StrategyKind::PerRecord]
        );
        assert_eq!(config.strategy.chunk_size, 7);
        assert_eq!(config.logs.files, 2);
        assert!(matches!(cli.command, Command::Logs(ref args) if args.per_file));
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let parsed = Cli::try_parse_from(["aggregation-bench", "--strategies", "fastest", "words"]);
        assert!(parsed.is_err());
    }
}
