// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use aggregation_core::completion::CompletionTracker;
use aggregation_core::error::AggregationError;
use aggregation_core::strategy::StrategyKind;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_all_workers_succeed() {
    let mut tracker = CompletionTracker::new();
    for worker_id in 0..5 {
        let guard = tracker.guard(worker_id);
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            guard.succeed();
        });
    }

    let report = tracker.wait_all().await;
    assert_eq!(report.registered, 5);
    assert_eq!(report.completed, 5);
    assert!(report.all_completed());
    assert_eq!(report.into_result(StrategyKind::WorkerPool).unwrap(), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_panicking_worker_still_reports() {
    let mut tracker = CompletionTracker::new();
    for worker_id in 0..3 {
        let guard = tracker.guard(worker_id);
        tokio::spawn(async move {
            if guard.worker_id() == 1 {
                panic!("worker {} crashed", guard.worker_id());
            }
            guard.succeed();
        });
    }

    let report = tracker.wait_all().await;
    assert_eq!(report.completed, 2);
    assert_eq!(report.failed, vec![1]);

    match report.into_result(StrategyKind::PerRecord) {
        Err(AggregationError::WorkersFailed {
            strategy,
            registered,
            failed,
        }) => {
            assert_eq!(strategy, StrategyKind::PerRecord);
            assert_eq!(registered, 3);
            assert_eq!(failed, vec![1]);
        }
        other => panic!("expected worker failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_guard_dropped_without_success_is_a_failure() {
    let mut tracker = CompletionTracker::new();
    let guard = tracker.guard(7);
    drop(guard);

    let report = tracker.wait_all().await;
    assert_eq!(report.failed, vec![7]);
    assert!(!report.all_completed());
}

#[tokio::test]
async fn test_no_workers_completes_immediately() {
    let tracker = CompletionTracker::new();
    let report = tracker.wait_all().await;
    assert_eq!(report.registered, 0);
    assert!(report.all_completed());
}
