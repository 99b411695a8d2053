// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Timestamps are spread over this many hours before "now"
const TIMESTAMP_WINDOW_HOURS: i64 = 30 * 24;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("at least one HTTP method is required")]
    NoMethods,

    #[error("at least one status code is required")]
    NoStatusCodes,

    #[error("distinct IP count must be at least 1")]
    ZeroIps,

    #[error("distinct endpoint count must be at least 1")]
    ZeroEndpoints,

    #[error("min size {min} is larger than max size {max}")]
    SizeRange { min: u64, max: u64 },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Shape of the fake access logs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogGeneratorConfig {
    #[serde(default = "default_files")]
    pub files: usize,
    #[serde(default = "default_lines_per_file")]
    pub lines_per_file: usize,
    #[serde(default = "default_distinct")]
    pub distinct_ips: usize,
    #[serde(default = "default_distinct")]
    pub distinct_endpoints: usize,
    #[serde(default = "default_methods")]
    pub methods: Vec<String>,
    #[serde(default = "default_status_codes")]
    pub status_codes: Vec<u16>,
    #[serde(default = "default_min_size")]
    pub min_size: u64,
    #[serde(default = "default_max_size")]
    pub max_size: u64,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_files() -> usize {
    100
}

fn default_lines_per_file() -> usize {
    10_000
}

fn default_distinct() -> usize {
    5
}

fn default_methods() -> Vec<String> {
    ["GET", "POST", "PUT", "DELETE"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_status_codes() -> Vec<u16> {
    vec![100, 200, 300, 400]
}

fn default_min_size() -> u64 {
    200
}

fn default_max_size() -> u64 {
    1600
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("logs")
}

impl Default for LogGeneratorConfig {
    fn default() -> Self {
        Self {
            files: default_files(),
            lines_per_file: default_lines_per_file(),
            distinct_ips: default_distinct(),
            distinct_endpoints: default_distinct(),
            methods: default_methods(),
            status_codes: default_status_codes(),
            min_size: default_min_size(),
            max_size: default_max_size(),
            output_dir: default_output_dir(),
        }
    }
}

impl LogGeneratorConfig {
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.methods.is_empty() {
            return Err(GeneratorError::NoMethods);
        }
        if self.status_codes.is_empty() {
            return Err(GeneratorError::NoStatusCodes);
        }
        if self.distinct_ips == 0 {
            return Err(GeneratorError::ZeroIps);
        }
        if self.distinct_endpoints == 0 {
            return Err(GeneratorError::ZeroEndpoints);
        }
        if self.min_size > self.max_size {
            return Err(GeneratorError::SizeRange {
                min: self.min_size,
                max: self.max_size,
            });
        }
        Ok(())
    }

    pub fn total_lines(&self) -> usize {
        self.files * self.lines_per_file
    }

    /// `log1.txt` .. `log{files}.txt` under the output directory
    pub fn file_paths(&self) -> Vec<PathBuf> {
        log_file_paths(&self.output_dir, self.files)
    }
}

pub fn log_file_paths(dir: &Path, files: usize) -> Vec<PathBuf> {
    (1..=files)
        .map(|index| dir.join(format!("log{}.txt", index)))
        .collect()
}

/// One random line; the config must already be validated
pub fn generate_log_line(
    rng: &mut impl Rng,
    config: &LogGeneratorConfig,
    now: DateTime<Utc>,
) -> String {
    let ip = rng.random_range(1..=config.distinct_ips);
    let hours_ago = rng.random_range(0..TIMESTAMP_WINDOW_HOURS);
    let timestamp = now - TimeDelta::hours(hours_ago);
    let method = &config.methods[rng.random_range(0..config.methods.len())];
    let endpoint = rng.random_range(1..=config.distinct_endpoints);
    let status = config.status_codes[rng.random_range(0..config.status_codes.len())];
    let size = rng.random_range(config.min_size..=config.max_size);

    format!(
        "192.168.1.{} {} {} /api/v1/resource{} {} {}",
        ip,
        timestamp.format(TIMESTAMP_FORMAT),
        method,
        endpoint,
        status,
        size
    )
}

/// In-memory log lines, without touching the filesystem
pub fn generate_log_lines(
    rng: &mut impl Rng,
    config: &LogGeneratorConfig,
    count: usize,
) -> Result<Vec<String>, GeneratorError> {
    config.validate()?;
    let now = Utc::now();
    Ok((0..count)
        .map(|_| generate_log_line(rng, config, now))
        .collect())
}

/// Writes `config.files` log files of `config.lines_per_file` lines each,
/// replacing any previous content, and returns their paths
pub fn write_log_files(
    rng: &mut impl Rng,
    config: &LogGeneratorConfig,
) -> Result<Vec<PathBuf>, GeneratorError> {
    config.validate()?;
    fs::create_dir_all(&config.output_dir).map_err(|source| GeneratorError::Io {
        path: config.output_dir.clone(),
        source,
    })?;

    let now = Utc::now();
    let paths = config.file_paths();
    for path in &paths {
        write_log_file(rng, config, path, now).map_err(|source| GeneratorError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), lines = config.lines_per_file, "log file written");
    }

    info!(
        files = paths.len(),
        lines = config.total_lines(),
        dir = %config.output_dir.display(),
        "generated log files"
    );
    Ok(paths)
}

fn write_log_file(
    rng: &mut impl Rng,
    config: &LogGeneratorConfig,
    path: &Path,
    now: DateTime<Utc>,
) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for _ in 0..config.lines_per_file {
        writeln!(writer, "{}", generate_log_line(rng, config, now))?;
    }
    writer.flush()
}
