// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::aggregator::aggregate;
use crate::error::AggregationError;
use crate::job::AggregationJob;
use crate::partition::Dataset;
use crate::result_set::ResultSet;
use crate::strategy::{Strategy, StrategyKind};
use async_trait::async_trait;

/// Single pass over the whole dataset; the baseline every other strategy is checked against
pub struct SequentialStrategy;

#[async_trait]
impl<J: AggregationJob> Strategy<J> for SequentialStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Sequential
    }

    async fn aggregate(&self, dataset: &Dataset<J::Record>) -> Result<ResultSet, AggregationError> {
        Ok(aggregate::<J>(dataset))
    }
}
