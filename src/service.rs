//! Service boundary used by the CLI and the lambda handler
//!
//! Each call takes a snapshot of the indicator's series and runs the whole
//! pipeline (filter -> compound -> adjust -> metrics) to completion. The
//! service holds no mutable state between calls, so one instance can serve
//! concurrent requests.

use chrono::NaiveDate;
use log::{debug, warn};
use rayon::prelude::*;

use crate::config::IndexerConfig;
use crate::error::{IndexerError, Result};
use crate::indicator::Indicator;
use crate::interest::{
    adjust, benchmarking_ratio, compound_series, interest_rate, interest_value, AdjustedValueSeries,
    AdjustmentSpec, SeriesSummary, YearlyRateTable,
};
use crate::series::{load_store, InMemoryStore, RateSeriesStore};

/// The one indicator benchmarking is currently implemented for
pub const BENCHMARK_INDICATOR: Indicator = Indicator::Cdi;

/// Parse a request date: `YYYY-MM-DD`, optionally followed by a time part
/// (`2023-01-01T00:00:00` or `2023-01-01 00:00:00`), which is ignored
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    let date_part = s.split(|c: char| c == 'T' || c == ' ').next().unwrap_or(s);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| IndexerError::InvalidDate(s.to_string()))
}

/// Indexer calculations over a rate series store
///
/// # Example
/// ```ignore
/// let service = IndexerService::from_config(&IndexerConfig::from_env())?;
/// let final_value = service.get_final_value(1000.0, start, end, "IPCA", 1, 6.0)?;
/// ```
#[derive(Debug, Clone)]
pub struct IndexerService<S = InMemoryStore> {
    store: S,
}

impl IndexerService<InMemoryStore> {
    /// Create a service by loading every series from the configured directory
    pub fn from_config(config: &IndexerConfig) -> Result<Self> {
        Ok(Self::new(load_store(&config.data_path)?))
    }
}

impl<S: RateSeriesStore> IndexerService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable store access, e.g. for registering a new month
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Compounded and adjusted series of an indicator over a date window
    ///
    /// A window without records is `EmptyRange`.
    pub fn adjusted_series(
        &self,
        indicator: Indicator,
        initial_value: f64,
        initial_date: NaiveDate,
        final_date: NaiveDate,
        adjustment: AdjustmentSpec,
    ) -> Result<AdjustedValueSeries> {
        let snapshot = self.store.snapshot(indicator)?;
        let filtered = snapshot.between(initial_date, final_date);
        if filtered.is_empty() {
            warn!("No {} records between {} and {}", indicator, initial_date, final_date);
            return Err(IndexerError::EmptyRange);
        }

        debug!(
            "{} {} records between {} and {} with {:?}",
            filtered.len(),
            indicator,
            initial_date,
            final_date,
            adjustment
        );

        let values = compound_series(&filtered, initial_value);
        Ok(adjust(&values, adjustment))
    }

    /// Final value of `initial_value` invested in an indicator plus an additional rate
    ///
    /// `rate_type`: 0 = None, 1 = Prefixed, 2 = Proportional.
    pub fn get_final_value(
        &self,
        initial_value: f64,
        initial_date: NaiveDate,
        final_date: NaiveDate,
        indicator: &str,
        rate_type: i64,
        add_rate_percent: f64,
    ) -> Result<f64> {
        let indicator: Indicator = indicator.parse()?;
        let adjustment = AdjustmentSpec::from_code(rate_type, add_rate_percent)?;
        self.adjusted_series(indicator, initial_value, initial_date, final_date, adjustment)?
            .final_value()
    }

    pub fn get_interest_value(&self, initial_value: f64, final_value: f64) -> f64 {
        interest_value(initial_value, final_value)
    }

    pub fn get_interest_rate(&self, initial_value: f64, final_value: f64) -> Result<f64> {
        interest_rate(initial_value, final_value)
    }

    /// Interest value earned by following an indicator over the window
    pub fn get_interest_value_by_indexer(
        &self,
        initial_value: f64,
        initial_date: NaiveDate,
        final_date: NaiveDate,
        indicator: &str,
        rate_type: i64,
        add_rate_percent: f64,
    ) -> Result<f64> {
        let final_value = self.get_final_value(
            initial_value,
            initial_date,
            final_date,
            indicator,
            rate_type,
            add_rate_percent,
        )?;
        Ok(interest_value(initial_value, final_value))
    }

    /// Interest rate earned by following an indicator over the window
    pub fn get_interest_rate_by_indexer(
        &self,
        initial_value: f64,
        initial_date: NaiveDate,
        final_date: NaiveDate,
        indicator: &str,
        rate_type: i64,
        add_rate_percent: f64,
    ) -> Result<f64> {
        let final_value = self.get_final_value(
            initial_value,
            initial_date,
            final_date,
            indicator,
            rate_type,
            add_rate_percent,
        )?;
        interest_rate(initial_value, final_value)
    }

    /// User's interest value divided by the indicator's over the same window
    ///
    /// Unknown names are `InvalidIndicator`; known indicators other than
    /// CDI are `UnsupportedBenchmark`.
    pub fn get_benchmarking(
        &self,
        initial_value: f64,
        final_value: f64,
        initial_date: NaiveDate,
        final_date: NaiveDate,
        indicator: &str,
    ) -> Result<f64> {
        let indicator: Indicator = indicator.parse()?;
        if indicator != BENCHMARK_INDICATOR {
            return Err(IndexerError::UnsupportedBenchmark(indicator));
        }

        let indexer_interest_value = self.get_interest_value_by_indexer(
            initial_value,
            initial_date,
            final_date,
            indicator.title(),
            0,
            0.0,
        )?;
        benchmarking_ratio(initial_value, final_value, indexer_interest_value)
    }

    /// Year by month history of an indicator
    pub fn yearly_table(&self, indicator: Indicator) -> Result<YearlyRateTable> {
        let snapshot = self.store.snapshot(indicator)?;
        Ok(YearlyRateTable::from_series(&snapshot))
    }

    /// Every indicator over the same window, each with its default adjustment
    ///
    /// Indicators are computed in parallel; a failure for one indicator does
    /// not hide the others.
    pub fn compare(
        &self,
        initial_value: f64,
        initial_date: NaiveDate,
        final_date: NaiveDate,
    ) -> Vec<(Indicator, Result<SeriesSummary>)> {
        Indicator::ALL
            .par_iter()
            .map(|&indicator| {
                let summary = self
                    .adjusted_series(
                        indicator,
                        initial_value,
                        initial_date,
                        final_date,
                        indicator.config().default_adjustment,
                    )
                    .and_then(|series| series.summary());
                (indicator, summary)
            })
            .collect()
    }
}
