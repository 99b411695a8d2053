// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::ConfigError;
use std::cmp::min;
use std::ops::Range;
use std::sync::Arc;

/// Shared, immutable input collection
pub type Dataset<R> = Arc<[R]>;

/// Contiguous slice of the dataset handed to one worker as a unit of work.
/// Holds a reference to the dataset instead of a copy of its records.
pub struct Chunk<R> {
    id: usize,
    range: Range<usize>,
    dataset: Dataset<R>,
}

impl<R> Chunk<R> {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn records(&self) -> &[R] {
        &self.dataset[self.range.clone()]
    }
}

/// Splits the dataset into ordered chunks of `chunk_size` records.
/// The last chunk may be shorter; an empty dataset yields no chunks.
pub fn partition<R>(dataset: &Dataset<R>, chunk_size: usize) -> Result<Vec<Chunk<R>>, ConfigError> {
    if chunk_size == 0 {
        return Err(ConfigError::ZeroChunkSize);
    }

    let num_chunks = dataset.len().div_ceil(chunk_size);
    let chunks = (0..num_chunks)
        .map(|id| {
            let start = id * chunk_size;
            let end = min(start + chunk_size, dataset.len());
            Chunk {
                id,
                range: start..end,
                dataset: Arc::clone(dataset),
            }
        })
        .collect();

    Ok(chunks)
}
