// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use aggregation_core::aggregator::aggregate;
use aggregation_core::config::StrategyConfig;
use aggregation_core::equivalence::equivalent;
use aggregation_core::partition::Dataset;
use aggregation_core::strategy::{run, StrategyKind};
use aggregation_word_count::generator::{generate_lines, generate_word, LineGeneratorConfig};
use aggregation_word_count::{WordCount, WORD};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_words_are_counted_per_occurrence() {
    let lines = vec![
        "the cat sat".to_string(),
        "  the   dog\tsat ".to_string(),
        String::new(),
    ];
    let result = aggregate::<WordCount>(&lines);

    assert_eq!(result.count(WORD, "the"), 2);
    assert_eq!(result.count(WORD, "sat"), 2);
    assert_eq!(result.count(WORD, "cat"), 1);
    assert_eq!(result.count(WORD, "bird"), 0);
    assert_eq!(result.total(WORD), 6);
    assert_eq!(result.records(), 3);
    assert_eq!(result.skipped(), 0);
}

#[test]
fn test_generated_lines_have_requested_shape() {
    let mut rng = StdRng::seed_from_u64(11);
    let config = LineGeneratorConfig {
        lines: 50,
        words_per_line: 12,
        word_length: 3,
    };
    let lines = generate_lines(&mut rng, &config);

    assert_eq!(lines.len(), 50);
    for line in &lines {
        let words: Vec<&str> = line.split(' ').collect();
        assert_eq!(words.len(), 12);
        assert!(words
            .iter()
            .all(|w| w.len() == 3 && w.bytes().all(|b| b.is_ascii_lowercase())));
    }

    let result = aggregate::<WordCount>(&lines);
    assert_eq!(result.total(WORD), 600);
}

#[test]
fn test_generate_word_length() {
    let mut rng = StdRng::seed_from_u64(5);
    assert_eq!(generate_word(&mut rng, 7).len(), 7);
    assert!(generate_word(&mut rng, 0).is_empty());
}

#[test]
fn test_generator_config_defaults() {
    let config = LineGeneratorConfig::default();
    assert_eq!(config.lines, 20_000);
    assert_eq!(config.words_per_line, 1_000);
    assert_eq!(config.word_length, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_all_strategies_agree_on_generated_text() {
    let mut rng = StdRng::seed_from_u64(2024);
    let config = LineGeneratorConfig {
        lines: 400,
        words_per_line: 25,
        word_length: 2,
    };
    let lines: Dataset<String> = generate_lines(&mut rng, &config).into();
    let strategy_config = StrategyConfig {
        workers: 4,
        chunk_size: 20,
        queue_capacity: 0,
        reducers: 10,
    };

    let baseline = run::<WordCount>(StrategyKind::Sequential, &lines, &strategy_config)
        .await
        .unwrap();
    assert_eq!(baseline.result.total(WORD), 10_000);

    for kind in StrategyKind::CONCURRENT {
        let outcome = run::<WordCount>(kind, &lines, &strategy_config).await.unwrap();
        assert!(equivalent(&baseline.result, &outcome.result), "{kind}");
    }
}
