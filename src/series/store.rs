//! Read-only snapshots of indicator series

use std::collections::HashMap;
use std::sync::Arc;

use super::{RatePoint, RateSeries};
use crate::error::{IndexerError, Result};
use crate::indicator::Indicator;

/// Source of rate series for the calculation pipeline
///
/// Implementations hand out immutable snapshots; concurrent requests may
/// hold the same snapshot while the store is updated.
pub trait RateSeriesStore: Send + Sync {
    /// Snapshot of the full series for an indicator
    fn snapshot(&self, indicator: Indicator) -> Result<Arc<RateSeries>>;
}

/// Store holding every series in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    series: HashMap<Indicator, Arc<RateSeries>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the series of its indicator
    pub fn insert(&mut self, series: RateSeries) {
        self.series.insert(series.indicator(), Arc::new(series));
    }

    /// Append one monthly record to an indicator's series
    ///
    /// Snapshots handed out earlier keep their old contents.
    pub fn append(&mut self, indicator: Indicator, point: RatePoint) -> Result<()> {
        let series = self
            .series
            .get_mut(&indicator)
            .ok_or(IndexerError::MissingSeries(indicator))?;
        Arc::make_mut(series).push(point)
    }
}

impl RateSeriesStore for InMemoryStore {
    fn snapshot(&self, indicator: Indicator) -> Result<Arc<RateSeries>> {
        self.series
            .get(&indicator)
            .cloned()
            .ok_or(IndexerError::MissingSeries(indicator))
    }
}
