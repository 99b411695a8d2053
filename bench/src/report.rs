// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::workload::FileLevelTrial;
use aggregation_core::harness::{BenchmarkReport, TrialReport, Verdict};
use aggregation_core::strategy::StrategyKind;
use std::time::Duration;

const LABEL_WIDTH: usize = 24;

pub fn print_trial(trial: &TrialReport) {
    if trial.all_equivalent() {
        println!(
            "Trial #{}: all {} strategies matched ({} records, {} skipped)",
            trial.trial,
            trial.verdicts.len(),
            trial.records,
            trial.skipped
        );
        return;
    }

    println!("Trial #{}: results differ from the sequential baseline", trial.trial);
    for verdict in &trial.verdicts {
        match &verdict.verdict {
            Verdict::Equivalent => println!("  {:<LABEL_WIDTH$} matched", verdict.kind.label()),
            Verdict::Mismatch(mismatch) => {
                println!("  {:<LABEL_WIDTH$} MISMATCH: {}", verdict.kind.label(), mismatch)
            }
            Verdict::Failed(err) => println!("  {:<LABEL_WIDTH$} FAILED: {}", verdict.kind.label(), err),
        }
    }
}

pub fn print_benchmark(report: &BenchmarkReport) {
    println!();
    for trial in &report.trials {
        print_trial(trial);
    }

    println!("\n=== AVERAGE RESULTS AFTER {} RUNS ===", report.trials.len());
    let baseline = report
        .average(StrategyKind::Sequential)
        .and_then(|average| average.mean);

    for average in &report.averages {
        let Some(mean) = average.mean else {
            println!("{:<LABEL_WIDTH$} no successful run", average.kind.label());
            continue;
        };

        let mut line = format!("{:<LABEL_WIDTH$} {:>12}", average.kind.label(), format_duration(mean));
        if average.kind != StrategyKind::Sequential {
            if let Some(baseline) = baseline {
                line.push_str(&format!("  {:>6.2}x", speedup(baseline, mean)));
            }
        }
        if average.mismatches > 0 || average.failures > 0 {
            line.push_str(&format!(
                "  ({} mismatched, {} failed)",
                average.mismatches, average.failures
            ));
        }
        println!("{}", line);
    }

    if report.all_equivalent() {
        println!("\nAll strategies matched the sequential baseline in every trial");
    } else {
        println!("\nSome strategies did not match the sequential baseline, see trials above");
    }
}

pub fn print_file_level(trials: &[FileLevelTrial]) {
    if trials.is_empty() {
        return;
    }

    println!("\n=== FILE-LEVEL ANALYSIS ===");
    for trial in trials {
        let verdict = if trial.matched { "Results are equal" } else { "Results are not equal" };
        println!("Trial #{}: {}", trial.trial, verdict);
        if trial.failed_files > 0 {
            println!("  {} files could not be read", trial.failed_files);
        }
    }

    let sequential = mean(trials.iter().map(|t| t.sequential), trials.len());
    let concurrent = mean(trials.iter().map(|t| t.concurrent), trials.len());
    let (Some(sequential), Some(concurrent)) = (sequential, concurrent) else {
        println!("\nToo many runs to average");
        return;
    };

    println!("\n=== AVERAGE RESULTS AFTER {} RUNS ===", trials.len());
    println!("{:<LABEL_WIDTH$} {:>12}", "Sequential (per file)", format_duration(sequential));
    println!(
        "{:<LABEL_WIDTH$} {:>12}  {:>6.2}x",
        "Concurrent (per file)",
        format_duration(concurrent),
        speedup(sequential, concurrent)
    );
}

/// None when there is nothing to average or `count` does not fit a `u32`
fn mean(durations: impl Iterator<Item = Duration>, count: usize) -> Option<Duration> {
    let count = u32::try_from(count).ok().filter(|&count| count > 0)?;
    Some(durations.sum::<Duration>() / count)
}

fn format_duration(duration: Duration) -> String {
    format!("{:.3}ms", duration.as_secs_f64() * 1000.0)
}

fn speedup(baseline: Duration, other: Duration) -> f64 {
    if other.is_zero() {
        return 0.0;
    }
    baseline.as_secs_f64() / other.as_secs_f64()
}
