// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Shape of the random text used as word-count input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineGeneratorConfig {
    #[serde(default = "default_lines")]
    pub lines: usize,
    #[serde(default = "default_words_per_line")]
    pub words_per_line: usize,
    /// Letters per word; short words keep the key space small and the counts high
    #[serde(default = "default_word_length")]
    pub word_length: usize,
}

fn default_lines() -> usize {
    20_000
}

fn default_words_per_line() -> usize {
    1_000
}

fn default_word_length() -> usize {
    3
}

impl Default for LineGeneratorConfig {
    fn default() -> Self {
        Self {
            lines: default_lines(),
            words_per_line: default_words_per_line(),
            word_length: default_word_length(),
        }
    }
}

pub fn generate_word(rng: &mut impl Rng, length: usize) -> String {
    (0..length)
        .map(|_| {
            let c = rng.random_range(b'a'..=b'z');
            c as char
        })
        .collect()
}

pub fn generate_line(rng: &mut impl Rng, config: &LineGeneratorConfig) -> String {
    let mut line = String::with_capacity(config.words_per_line * (config.word_length + 1));
    for i in 0..config.words_per_line {
        if i > 0 {
            line.push(' ');
        }
        line.push_str(&generate_word(rng, config.word_length));
    }
    line
}

/// Lines of random lowercase words separated by single spaces
pub fn generate_lines(rng: &mut impl Rng, config: &LineGeneratorConfig) -> Vec<String> {
    (0..config.lines)
        .map(|_| generate_line(rng, config))
        .collect()
}
