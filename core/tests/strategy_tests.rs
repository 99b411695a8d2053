// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod common;

use aggregation_core::config::StrategyConfig;
use aggregation_core::equivalence::{equivalent, first_mismatch};
use aggregation_core::error::{AggregationError, ConfigError};
use aggregation_core::partition::Dataset;
use aggregation_core::strategy::{build, run, StrategyKind};
use common::{dataset, random_lines, FaultyJob, LetterJob, WORD};

fn config(workers: usize, chunk_size: usize, queue_capacity: usize) -> StrategyConfig {
    StrategyConfig {
        workers,
        chunk_size,
        queue_capacity,
        reducers: 3,
    }
}

async fn assert_all_match_sequential(lines: Dataset<String>, config: &StrategyConfig) {
    let baseline = run::<LetterJob>(StrategyKind::Sequential, &lines, config)
        .await
        .unwrap();

    for kind in StrategyKind::CONCURRENT {
        let outcome = run::<LetterJob>(kind, &lines, config).await.unwrap();
        assert_eq!(outcome.kind, kind);
        assert!(
            equivalent(&baseline.result, &outcome.result),
            "{kind} differs: {:?}",
            first_mismatch(&baseline.result, &outcome.result)
        );
        assert_eq!(outcome.result.records(), baseline.result.records(), "{kind}");
        assert_eq!(outcome.result.skipped(), baseline.result.skipped(), "{kind}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_every_strategy_matches_sequential() {
    let lines: Dataset<String> = random_lines(42, 1_000).into();
    assert_all_match_sequential(lines, &config(4, 37, 8)).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_strategies_match_across_configs() {
    let lines: Dataset<String> = random_lines(7, 300).into();
    for (workers, chunk_size, capacity) in [(1, 1, 0), (3, 500, 1), (16, 5, 100), (2, 299, 0)] {
        assert_all_match_sequential(lines.clone(), &config(workers, chunk_size, capacity)).await;
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_empty_input_gives_empty_result_everywhere() {
    let lines = dataset(&[]);
    for kind in StrategyKind::ALL {
        let outcome = run::<LetterJob>(kind, &lines, &config(4, 10, 0)).await.unwrap();
        assert!(outcome.result.is_empty(), "{kind}");
        assert_eq!(outcome.result.records(), 0, "{kind}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_repeated_runs_give_identical_counts() {
    let lines: Dataset<String> = random_lines(99, 500).into();
    let config = config(4, 20, 2);

    for kind in StrategyKind::ALL {
        let first = run::<LetterJob>(kind, &lines, &config).await.unwrap();
        let second = run::<LetterJob>(kind, &lines, &config).await.unwrap();
        assert!(equivalent(&first.result, &second.result), "{kind}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_malformed_records_are_skipped_and_counted() {
    let lines = dataset(&["gold dust", "# bad", "gold", "# worse", "dust"]);
    for kind in StrategyKind::ALL {
        let outcome = run::<LetterJob>(kind, &lines, &config(2, 2, 0)).await.unwrap();
        assert_eq!(outcome.result.count(WORD, "gold"), 2, "{kind}");
        assert_eq!(outcome.result.records(), 3, "{kind}");
        assert_eq!(outcome.result.skipped(), 2, "{kind}");
    }
}

#[tokio::test]
async fn test_invalid_config_is_rejected_before_running() {
    let lines = dataset(&["gold"]);
    let result = run::<LetterJob>(StrategyKind::WorkerPool, &lines, &config(0, 10, 0)).await;
    assert!(matches!(
        result,
        Err(AggregationError::Config(ConfigError::ZeroWorkers))
    ));

    let result = run::<LetterJob>(StrategyKind::Sequential, &lines, &config(1, 0, 0)).await;
    assert!(matches!(
        result,
        Err(AggregationError::Config(ConfigError::ZeroChunkSize))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_failed_worker_does_not_hang_the_run() {
    let mut lines = random_lines(3, 200);
    lines[57] = "boom".to_string();
    let lines: Dataset<String> = lines.into();

    for kind in StrategyKind::CONCURRENT {
        let result = run::<FaultyJob>(kind, &lines, &config(3, 10, 0)).await;
        match result {
            Err(AggregationError::WorkersFailed {
                strategy, failed, ..
            }) => {
                assert_eq!(strategy, kind);
                assert!(!failed.is_empty());
            }
            other => panic!("{kind}: expected worker failure, got {other:?}"),
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_per_record_failure_names_the_task() {
    let lines = dataset(&["gold", "boom", "dust"]);
    let result = run::<FaultyJob>(StrategyKind::PerRecord, &lines, &config(2, 1, 0)).await;

    match result {
        Err(AggregationError::WorkersFailed {
            registered, failed, ..
        }) => {
            assert_eq!(registered, 3);
            assert_eq!(failed, vec![1]);
        }
        other => panic!("expected worker failure, got {other:?}"),
    }
}

#[test]
fn test_build_reports_kind() {
    let config = StrategyConfig::default();
    for kind in StrategyKind::ALL {
        assert_eq!(build::<LetterJob>(kind, &config).kind(), kind);
    }
}

#[test]
fn test_strategy_names_round_trip() {
    for kind in StrategyKind::ALL {
        assert_eq!(kind.name().parse::<StrategyKind>().unwrap(), kind);
    }
    assert_eq!(" Worker-Pool ".parse::<StrategyKind>().unwrap(), StrategyKind::WorkerPool);
    assert!("round-robin".parse::<StrategyKind>().is_err());
}

#[test]
fn test_strategy_config_defaults_from_json() {
    let config: StrategyConfig = serde_json::from_str(r#"{ "chunk_size": 20 }"#).unwrap();
    assert_eq!(config.chunk_size, 20);
    assert_eq!(config.queue_capacity, 0);
    assert_eq!(config.reducers, 10);
    assert!(config.workers >= 1);
    assert_eq!(config.channel_capacity(), 1);
    assert!(config.validate().is_ok());

    let kinds: Vec<StrategyKind> =
        serde_json::from_str(r#"["mutex-reduce", "buffered-channel"]"#).unwrap();
    assert_eq!(kinds, vec![StrategyKind::MutexReduce, StrategyKind::BufferedChannel]);
}

#[test]
fn test_strategy_config_validation() {
    let config = StrategyConfig {
        reducers: 0,
        ..StrategyConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::ZeroReducers));
}
