// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::AggregationError;
use crate::job::AggregationJob;
use crate::partition::Dataset;
use crate::per_record_strategy::fan_out;
use crate::result_set::ResultSet;
use crate::strategy::{Strategy, StrategyKind};
use async_trait::async_trait;

/// Per-record fan-out with a result channel as large as the input, so no producer ever blocks
pub struct BufferedChannelStrategy;

#[async_trait]
impl<J: AggregationJob> Strategy<J> for BufferedChannelStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::BufferedChannel
    }

    async fn aggregate(&self, dataset: &Dataset<J::Record>) -> Result<ResultSet, AggregationError> {
        let capacity = dataset.len().max(1);
        fan_out::<J>(StrategyKind::BufferedChannel, dataset, capacity).await
    }
}
