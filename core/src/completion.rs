// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::AggregationError;
use crate::strategy::StrategyKind;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::warn;

/// Completion message: Ok(worker_id) for success, Err(worker_id) for failure
pub type CompletionMessage = Result<usize, usize>;

/// Counts workers down to zero.
///
/// Every worker carries a [`CompletionGuard`]; the guard reports exactly once,
/// when dropped, so a worker that panics or bails out still reports (as a
/// failure) and `wait_all` cannot hang on it.
pub struct CompletionTracker {
    tx: UnboundedSender<CompletionMessage>,
    rx: UnboundedReceiver<CompletionMessage>,
    registered: usize,
}

impl Default for CompletionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionTracker {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            registered: 0,
        }
    }

    /// Registers a worker and returns the guard it must hold for its whole body
    pub fn guard(&mut self, worker_id: usize) -> CompletionGuard {
        self.registered += 1;
        CompletionGuard {
            worker_id,
            tx: self.tx.clone(),
            succeeded: false,
        }
    }

    pub fn registered(&self) -> usize {
        self.registered
    }

    /// Waits until every registered worker has reported
    pub async fn wait_all(self) -> CompletionReport {
        let Self {
            tx,
            mut rx,
            registered,
        } = self;
        drop(tx);

        let mut report = CompletionReport {
            registered,
            completed: 0,
            failed: Vec::new(),
        };
        while let Some(message) = rx.recv().await {
            match message {
                Ok(_) => report.completed += 1,
                Err(worker_id) => {
                    warn!(worker_id, "worker exited without completing");
                    report.failed.push(worker_id);
                }
            }
        }
        report
    }
}

/// Reports its worker's outcome when dropped
pub struct CompletionGuard {
    worker_id: usize,
    tx: UnboundedSender<CompletionMessage>,
    succeeded: bool,
}

impl CompletionGuard {
    pub fn worker_id(&self) -> usize {
        self.worker_id
    }

    /// Marks the worker as finished; the success message goes out on drop
    pub fn succeed(mut self) {
        self.succeeded = true;
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        let message = if self.succeeded {
            Ok(self.worker_id)
        } else {
            Err(self.worker_id)
        };
        // The tracker may already be gone if its strategy was abandoned
        let _ = self.tx.send(message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReport {
    pub registered: usize,
    pub completed: usize,
    pub failed: Vec<usize>,
}

impl CompletionReport {
    pub fn all_completed(&self) -> bool {
        self.failed.is_empty() && self.completed == self.registered
    }

    pub fn into_result(mut self, strategy: StrategyKind) -> Result<usize, AggregationError> {
        if self.all_completed() {
            return Ok(self.completed);
        }
        self.failed.sort_unstable();
        Err(AggregationError::WorkersFailed {
            strategy,
            registered: self.registered,
            failed: self.failed,
        })
    }
}
