// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::StrategyConfig;
use crate::equivalence::{first_mismatch, Mismatch};
use crate::error::{AggregationError, BoxError, ConfigError, HarnessError};
use crate::job::AggregationJob;
use crate::partition::Dataset;
use crate::strategy::{self, StrategyKind};
use std::time::Duration;
use tracing::{info, warn};

/// Trait for producing a fresh input collection for each trial
pub trait InputSource<R> {
    fn next_input(&mut self, trial: usize) -> Result<Vec<R>, BoxError>;
}

impl<F, R> InputSource<R> for F
where
    F: FnMut(usize) -> Result<Vec<R>, BoxError>,
{
    fn next_input(&mut self, trial: usize) -> Result<Vec<R>, BoxError> {
        (self)(trial)
    }
}

/// Outcome of one concurrent strategy within a trial
#[derive(Debug)]
pub enum Verdict {
    Equivalent,
    Mismatch(Mismatch),
    Failed(AggregationError),
}

impl Verdict {
    pub fn is_equivalent(&self) -> bool {
        matches!(self, Verdict::Equivalent)
    }
}

#[derive(Debug)]
pub struct StrategyVerdict {
    pub kind: StrategyKind,
    /// None when the strategy failed before producing a result
    pub elapsed: Option<Duration>,
    pub verdict: Verdict,
}

#[derive(Debug)]
pub struct TrialReport {
    pub trial: usize,
    pub records: usize,
    pub skipped: u64,
    pub baseline_elapsed: Duration,
    pub verdicts: Vec<StrategyVerdict>,
}

impl TrialReport {
    pub fn all_equivalent(&self) -> bool {
        self.verdicts.iter().all(|v| v.verdict.is_equivalent())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyAverage {
    pub kind: StrategyKind,
    /// Mean over the runs that produced a result; None if none did
    pub mean: Option<Duration>,
    pub runs: usize,
    pub mismatches: usize,
    pub failures: usize,
}

#[derive(Debug)]
pub struct BenchmarkReport {
    pub trials: Vec<TrialReport>,
    /// Sequential first, then the concurrent strategies in run order
    pub averages: Vec<StrategyAverage>,
}

impl BenchmarkReport {
    pub fn all_equivalent(&self) -> bool {
        self.trials.iter().all(TrialReport::all_equivalent)
    }

    pub fn average(&self, kind: StrategyKind) -> Option<&StrategyAverage> {
        self.averages.iter().find(|a| a.kind == kind)
    }
}

/// Runs every strategy over fresh input for a number of trials and checks
/// each concurrent result against the sequential baseline
pub struct Benchmark {
    trials: usize,
    strategies: Vec<StrategyKind>,
    config: StrategyConfig,
}

impl Benchmark {
    /// Rejects a bad configuration before any input is generated.
    /// Sequential is always the baseline, so it is dropped from `strategies`.
    pub fn new(
        trials: usize,
        strategies: impl IntoIterator<Item = StrategyKind>,
        config: StrategyConfig,
    ) -> Result<Self, ConfigError> {
        if trials == 0 {
            return Err(ConfigError::ZeroTrials);
        }
        config.validate()?;

        let mut concurrent: Vec<StrategyKind> = Vec::new();
        for kind in strategies {
            if kind != StrategyKind::Sequential && !concurrent.contains(&kind) {
                concurrent.push(kind);
            }
        }

        Ok(Self {
            trials,
            strategies: concurrent,
            config,
        })
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    pub fn strategies(&self) -> &[StrategyKind] {
        &self.strategies
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub async fn run<J, S>(&self, source: &mut S) -> Result<BenchmarkReport, HarnessError>
    where
        J: AggregationJob,
        S: InputSource<J::Record> + ?Sized,
    {
        let mut totals = Totals::new(&self.strategies);
        let mut trials = Vec::with_capacity(self.trials);

        for trial in 1..=self.trials {
            let records = source
                .next_input(trial)
                .map_err(|source| HarnessError::Input { trial, source })?;
            let dataset: Dataset<J::Record> = records.into();

            info!(job = J::NAME, trial, records = dataset.len(), "starting trial");

            let baseline = strategy::run::<J>(StrategyKind::Sequential, &dataset, &self.config)
                .await
                .map_err(|source| HarnessError::Baseline { trial, source })?;
            totals.completed(StrategyKind::Sequential, baseline.elapsed, false);

            let mut verdicts = Vec::with_capacity(self.strategies.len());
            for &kind in &self.strategies {
                let verdict = match strategy::run::<J>(kind, &dataset, &self.config).await {
                    Ok(run) => {
                        let mismatch = first_mismatch(&baseline.result, &run.result);
                        totals.completed(kind, run.elapsed, mismatch.is_some());
                        StrategyVerdict {
                            kind,
                            elapsed: Some(run.elapsed),
                            verdict: match mismatch {
                                None => Verdict::Equivalent,
                                Some(mismatch) => {
                                    warn!(trial, strategy = %kind, %mismatch, "result differs from baseline");
                                    Verdict::Mismatch(mismatch)
                                }
                            },
                        }
                    }
                    Err(err) => {
                        warn!(trial, strategy = %kind, %err, "strategy failed");
                        totals.failed(kind);
                        StrategyVerdict {
                            kind,
                            elapsed: None,
                            verdict: Verdict::Failed(err),
                        }
                    }
                };
                verdicts.push(verdict);
            }

            trials.push(TrialReport {
                trial,
                records: dataset.len(),
                skipped: baseline.result.skipped(),
                baseline_elapsed: baseline.elapsed,
                verdicts,
            });
        }

        Ok(BenchmarkReport {
            trials,
            averages: totals.into_averages(),
        })
    }
}

struct Total {
    kind: StrategyKind,
    elapsed: Duration,
    runs: usize,
    mismatches: usize,
    failures: usize,
}

struct Totals(Vec<Total>);

impl Totals {
    fn new(concurrent: &[StrategyKind]) -> Self {
        let kinds = std::iter::once(StrategyKind::Sequential).chain(concurrent.iter().copied());
        Self(
            kinds
                .map(|kind| Total {
                    kind,
                    elapsed: Duration::ZERO,
                    runs: 0,
                    mismatches: 0,
                    failures: 0,
                })
                .collect(),
        )
    }

    fn entry(&mut self, kind: StrategyKind) -> Option<&mut Total> {
        self.0.iter_mut().find(|t| t.kind == kind)
    }

    fn completed(&mut self, kind: StrategyKind, elapsed: Duration, mismatch: bool) {
        if let Some(total) = self.entry(kind) {
            total.elapsed += elapsed;
            total.runs += 1;
            if mismatch {
                total.mismatches += 1;
            }
        }
    }

    fn failed(&mut self, kind: StrategyKind) {
        if let Some(total) = self.entry(kind) {
            total.failures += 1;
        }
    }

    fn into_averages(self) -> Vec<StrategyAverage> {
        self.0
            .into_iter()
            .map(|total| StrategyAverage {
                kind: total.kind,
                mean: u32::try_from(total.runs)
                    .ok()
                    .filter(|&runs| runs > 0)
                    .map(|runs| total.elapsed / runs),
                runs: total.runs,
                mismatches: total.mismatches,
                failures: total.failures,
            })
            .collect()
    }
}
