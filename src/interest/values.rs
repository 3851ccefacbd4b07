//! Value series produced by the compounding and adjustment steps

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::adjustment::AdjustmentSpec;
use super::metrics::{interest_rate, interest_value, monthly_equivalent, yearly_equivalent};
use crate::error::{IndexerError, Result};
use crate::indicator::Indicator;

/// One compounded period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRow {
    pub date: NaiveDate,
    pub rate_percent: f64,
    pub value: f64,
}

/// Principal compounded period by period over an indicator's rates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueSeries {
    indicator: Indicator,
    initial_value: f64,
    rows: Vec<ValueRow>,
}

impl ValueSeries {
    pub fn new(indicator: Indicator, initial_value: f64, rows: Vec<ValueRow>) -> Self {
        Self { indicator, initial_value, rows }
    }

    pub fn indicator(&self) -> Indicator {
        self.indicator
    }

    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }

    pub fn rows(&self) -> &[ValueRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value after the last period, if any period exists
    pub fn last_value(&self) -> Option<f64> {
        self.rows.last().map(|r| r.value)
    }

    /// Value after the last period; an empty series is `EmptyRange`
    pub fn final_value(&self) -> Result<f64> {
        self.last_value().ok_or(IndexerError::EmptyRange)
    }
}

/// Compounded period with the additional rate blended in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustedRow {
    pub date: NaiveDate,
    pub rate_percent: f64,
    pub value: f64,
    pub adjusted_rate_percent: f64,
    pub adjusted_value: f64,
}

/// Base value series plus the adjusted rate/value columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustedValueSeries {
    indicator: Indicator,
    initial_value: f64,
    adjustment: AdjustmentSpec,
    rows: Vec<AdjustedRow>,
}

impl AdjustedValueSeries {
    pub fn new(
        indicator: Indicator,
        initial_value: f64,
        adjustment: AdjustmentSpec,
        rows: Vec<AdjustedRow>,
    ) -> Self {
        Self { indicator, initial_value, adjustment, rows }
    }

    pub fn indicator(&self) -> Indicator {
        self.indicator
    }

    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }

    pub fn adjustment(&self) -> AdjustmentSpec {
        self.adjustment
    }

    pub fn rows(&self) -> &[AdjustedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Adjusted value after the last period; an empty series is `EmptyRange`
    pub fn final_value(&self) -> Result<f64> {
        self.rows
            .last()
            .map(|r| r.adjusted_value)
            .ok_or(IndexerError::EmptyRange)
    }

    /// Period-end aggregates
    pub fn summary(&self) -> Result<SeriesSummary> {
        let last = self.rows.last().ok_or(IndexerError::EmptyRange)?;
        let months = self.rows.len() as u32;

        let total_rate = interest_rate(self.initial_value, last.adjusted_value)?;
        let monthly = monthly_equivalent(months, total_rate)?;

        Ok(SeriesSummary {
            indicator: self.indicator,
            adjustment: self.adjustment,
            initial_date: self.rows[0].date,
            final_date: last.date,
            months,
            initial_value: self.initial_value,
            final_base_value: last.value,
            final_value: last.adjusted_value,
            interest_value: interest_value(self.initial_value, last.adjusted_value),
            interest_rate: total_rate,
            monthly_equivalent_rate: monthly,
            yearly_equivalent_rate: yearly_equivalent(monthly),
        })
    }
}

/// Summary of an adjusted series over its whole window
///
/// Rates here are fractions (0.12 = 12%), matching the interest metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub indicator: Indicator,
    pub adjustment: AdjustmentSpec,
    pub initial_date: NaiveDate,
    pub final_date: NaiveDate,
    pub months: u32,
    pub initial_value: f64,
    pub final_base_value: f64,
    pub final_value: f64,
    pub interest_value: f64,
    pub interest_rate: f64,
    pub monthly_equivalent_rate: f64,
    pub yearly_equivalent_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interest::RateType;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn test_empty_series_has_no_final_value() {
        let values = ValueSeries::new(Indicator::Cdi, 1000.0, Vec::new());
        assert_eq!(values.last_value(), None);
        assert!(matches!(values.final_value(), Err(IndexerError::EmptyRange)));

        let adjusted = AdjustedValueSeries::new(Indicator::Cdi, 1000.0, AdjustmentSpec::none(), Vec::new());
        assert!(matches!(adjusted.final_value(), Err(IndexerError::EmptyRange)));
        assert!(matches!(adjusted.summary(), Err(IndexerError::EmptyRange)));
    }

    #[test]
    fn test_summary_of_twelve_months() {
        // 1% a month for a year
        let mut value = 1000.0;
        let rows: Vec<AdjustedRow> = (1..=12)
            .map(|m| {
                value *= 1.01;
                AdjustedRow {
                    date: date(2021, m),
                    rate_percent: 1.0,
                    value,
                    adjusted_rate_percent: 1.0,
                    adjusted_value: value,
                }
            })
            .collect();
        let series = AdjustedValueSeries::new(
            Indicator::Selic,
            1000.0,
            AdjustmentSpec { rate_type: RateType::None, rate_value: 0.0 },
            rows,
        );

        let summary = series.summary().unwrap();
        assert_eq!(summary.months, 12);
        assert_eq!(summary.initial_date, date(2021, 1));
        assert_eq!(summary.final_date, date(2021, 12));
        assert_relative_eq!(summary.interest_value, 1000.0 * (1.01_f64.powi(12) - 1.0), max_relative = 1e-9);
        assert_relative_eq!(summary.monthly_equivalent_rate, 0.01, max_relative = 1e-9);
        assert_relative_eq!(summary.yearly_equivalent_rate, summary.interest_rate, max_relative = 1e-9);
    }
}
