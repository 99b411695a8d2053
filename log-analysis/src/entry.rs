// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use aggregation_core::error::MalformedRecord;
use std::fmt;

/// Positional fields of an access log line
pub const FIELD_COUNT: usize = 6;

/// One access log line: `IP TIMESTAMP METHOD ENDPOINT STATUS SIZE`.
/// Borrows from the line it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEntry<'a> {
    pub ip: &'a str,
    pub timestamp: &'a str,
    pub method: &'a str,
    pub endpoint: &'a str,
    pub status: &'a str,
    pub size: i64,
}

impl<'a> LogEntry<'a> {
    /// Fields are whitespace separated and read by position; anything
    /// after the sixth field is ignored. Only a short line is malformed:
    /// SIZE is read with [`parse_size`], never rejected.
    pub fn parse(line: &'a str) -> Result<Self, MalformedRecord> {
        let fields: Vec<&'a str> = line.split_whitespace().take(FIELD_COUNT).collect();
        if fields.len() < FIELD_COUNT {
            return Err(MalformedRecord::new(format!(
                "expected {} fields, found {}",
                FIELD_COUNT,
                fields.len()
            )));
        }

        let size = parse_size(fields[5]);

        Ok(Self {
            ip: fields[0],
            timestamp: fields[1],
            method: fields[2],
            endpoint: fields[3],
            status: fields[4],
            size,
        })
    }

    pub fn size_bucket(&self) -> SizeBucket {
        SizeBucket::classify(self.size)
    }
}

/// Leading signed decimal integer of `field` (`"12abc"` is 12, `"-5"` is -5).
/// No digits, or a value out of range, reads as 0.
pub fn parse_size(field: &str) -> i64 {
    let digits_start = usize::from(field.starts_with(['+', '-']));
    let digits_len = field[digits_start..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    field[..digits_start + digits_len].parse().unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeBucket {
    Small,
    Medium,
    Large,
}

impl SizeBucket {
    pub const SMALL_LIMIT: i64 = 500;
    pub const MEDIUM_LIMIT: i64 = 1000;

    /// Negative sizes fall in `Small`
    pub fn classify(size: i64) -> Self {
        if size < Self::SMALL_LIMIT {
            SizeBucket::Small
        } else if size < Self::MEDIUM_LIMIT {
            SizeBucket::Medium
        } else {
            SizeBucket::Large
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SizeBucket::Small => "small",
            SizeBucket::Medium => "medium",
            SizeBucket::Large => "large",
        }
    }
}

impl fmt::Display for SizeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
