//! Blending an additional rate into a compounded indicator series

use log::debug;
use serde::{Deserialize, Serialize};

use super::compound::{cumulative_values, monthly_rate_from_yearly};
use super::values::{AdjustedRow, AdjustedValueSeries, ValueSeries};
use crate::error::{IndexerError, Result};

/// How the additional rate is combined with the indicator
///
/// The integer codes (0, 1, 2) are part of the public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateType {
    /// Indicator return only
    None,
    /// Indicator plus a fixed annual spread, e.g. "IPCA + 6% a.a."
    Prefixed,
    /// Percentage of the indicator's gain, e.g. "120% do CDI"
    Proportional,
}

impl RateType {
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(RateType::None),
            1 => Ok(RateType::Prefixed),
            2 => Ok(RateType::Proportional),
            other => Err(IndexerError::InvalidRateType(other)),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            RateType::None => 0,
            RateType::Prefixed => 1,
            RateType::Proportional => 2,
        }
    }

    /// Dashboard label
    pub fn label(&self) -> &'static str {
        match self {
            RateType::None => "Nenhuma",
            RateType::Prefixed => "Préfixada(+)",
            RateType::Proportional => "Proporcional(x)",
        }
    }
}

/// Additional rate applied on top of an indicator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentSpec {
    pub rate_type: RateType,

    /// Percent. Annual spread for `Prefixed`, multiplier for `Proportional`
    /// (120.0 = 120% of the indicator), ignored for `None`.
    pub rate_value: f64,
}

impl AdjustmentSpec {
    pub fn none() -> Self {
        Self { rate_type: RateType::None, rate_value: 0.0 }
    }

    pub fn prefixed(yearly_rate_percent: f64) -> Self {
        Self { rate_type: RateType::Prefixed, rate_value: yearly_rate_percent }
    }

    pub fn proportional(multiplier_percent: f64) -> Self {
        Self { rate_type: RateType::Proportional, rate_value: multiplier_percent }
    }

    /// Build from the API's integer code and rate
    pub fn from_code(code: i64, rate_value: f64) -> Result<Self> {
        Ok(Self { rate_type: RateType::from_code(code)?, rate_value })
    }
}

/// Apply an adjustment to a compounded series
///
/// - `None`: adjusted columns repeat the base columns.
/// - `Prefixed`: the annual spread becomes a constant monthly increment
///   that compounds on its own from the same principal; its gain is added
///   to the base value, and the displayed rate is base + increment.
/// - `Proportional`: the realized gain over the principal is scaled by
///   `rate_value/100` at every period, as is the displayed rate. A zero
///   multiplier keeps the principal flat.
pub fn adjust(values: &ValueSeries, spec: AdjustmentSpec) -> AdjustedValueSeries {
    let initial_value = values.initial_value();
    let base = values.rows();

    let rows: Vec<AdjustedRow> = match spec.rate_type {
        RateType::None => base
            .iter()
            .map(|row| AdjustedRow {
                date: row.date,
                rate_percent: row.rate_percent,
                value: row.value,
                adjusted_rate_percent: row.rate_percent,
                adjusted_value: row.value,
            })
            .collect(),

        RateType::Prefixed => {
            let increment = monthly_rate_from_yearly(spec.rate_value);
            let increment_values =
                cumulative_values(std::iter::repeat(increment).take(base.len()), initial_value);

            debug!(
                "Prefixed {:.4}% a.a. -> {:.6}% a.m. over {} periods",
                spec.rate_value,
                increment,
                base.len()
            );

            base.iter()
                .zip(increment_values)
                .map(|(row, increment_value)| AdjustedRow {
                    date: row.date,
                    rate_percent: row.rate_percent,
                    value: row.value,
                    adjusted_rate_percent: row.rate_percent + increment,
                    adjusted_value: row.value + (increment_value - initial_value),
                })
                .collect()
        }

        RateType::Proportional => {
            let multiplier = spec.rate_value / 100.0;
            base.iter()
                .map(|row| AdjustedRow {
                    date: row.date,
                    rate_percent: row.rate_percent,
                    value: row.value,
                    adjusted_rate_percent: row.rate_percent * multiplier,
                    adjusted_value: initial_value + (row.value - initial_value) * multiplier,
                })
                .collect()
        }
    };

    AdjustedValueSeries::new(values.indicator(), initial_value, spec, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::Indicator;
    use crate::interest::compound_series;
    use crate::series::{RatePoint, RateSeries};
    use approx::assert_relative_eq;

    fn base_series(rates: &[f64], initial_value: f64) -> ValueSeries {
        let points = rates
            .iter()
            .enumerate()
            .map(|(i, &r)| RatePoint::new(2010 + (i / 12) as i32, (i % 12) as u32 + 1, 1, r).unwrap())
            .collect();
        let series = RateSeries::new(Indicator::Ipca, points).unwrap();
        compound_series(&series, initial_value)
    }

    const IPCA_2015: [f64; 12] = [1.24, 1.22, 1.32, 0.71, 0.74, 0.79, 0.62, 0.22, 0.54, 0.82, 1.01, 0.96];

    #[test]
    fn test_rate_type_codes() {
        assert_eq!(RateType::from_code(0).unwrap(), RateType::None);
        assert_eq!(RateType::from_code(1).unwrap(), RateType::Prefixed);
        assert_eq!(RateType::from_code(2).unwrap(), RateType::Proportional);
        assert!(matches!(RateType::from_code(3), Err(IndexerError::InvalidRateType(3))));
        assert!(RateType::from_code(-1).is_err());

        for code in 0..3 {
            assert_eq!(RateType::from_code(code).unwrap().code() as i64, code);
        }
    }

    #[test]
    fn test_none_is_pass_through() {
        let base = base_series(&IPCA_2015, 1000.0);
        for rate_value in [0.0, 6.0, 250.0] {
            let adjusted = adjust(&base, AdjustmentSpec { rate_type: RateType::None, rate_value });
            for (b, a) in base.rows().iter().zip(adjusted.rows()) {
                assert_eq!(a.adjusted_rate_percent, b.rate_percent);
                assert_eq!(a.adjusted_value, b.value);
            }
        }
    }

    #[test]
    fn test_proportional_scales_gain_linearly() {
        let initial = 1000.0;
        let base = base_series(&IPCA_2015, initial);

        for multiplier in [50.0, 100.0, 120.0] {
            let adjusted = adjust(&base, AdjustmentSpec::proportional(multiplier));
            for row in adjusted.rows() {
                assert_relative_eq!(
                    row.adjusted_value - initial,
                    (multiplier / 100.0) * (row.value - initial),
                    max_relative = 1e-9
                );
                assert_relative_eq!(
                    row.adjusted_rate_percent,
                    row.rate_percent * multiplier / 100.0,
                    max_relative = 1e-12
                );
            }
        }
    }

    #[test]
    fn test_proportional_zero_is_flat() {
        let base = base_series(&IPCA_2015, 1000.0);
        let adjusted = adjust(&base, AdjustmentSpec::proportional(0.0));
        assert!(adjusted.rows().iter().all(|r| r.adjusted_value == 1000.0));
        assert_eq!(adjusted.final_value().unwrap(), 1000.0);
    }

    #[test]
    fn test_prefixed_spread_over_flat_base() {
        let base = base_series(&[0.0; 12], 1000.0);
        let adjusted = adjust(&base, AdjustmentSpec::prefixed(12.0));

        let first = adjusted.rows()[0];
        assert!((first.adjusted_rate_percent - 0.9489).abs() < 1e-4);
        assert_relative_eq!(adjusted.final_value().unwrap(), 1120.0, max_relative = 1e-9);
    }

    #[test]
    fn test_prefixed_adds_compounded_spread_gain() {
        let initial = 1000.0;
        let base = base_series(&IPCA_2015, initial);
        let adjusted = adjust(&base, AdjustmentSpec::prefixed(6.0));
        let increment = monthly_rate_from_yearly(6.0);

        for (i, row) in adjusted.rows().iter().enumerate() {
            let spread_gain = initial * ((1.0 + increment / 100.0).powi(i as i32 + 1) - 1.0);
            assert_relative_eq!(row.adjusted_value, row.value + spread_gain, max_relative = 1e-9);
            assert_relative_eq!(row.adjusted_rate_percent, row.rate_percent + increment);
        }
        // Twelve months of 6% a.a. spread contribute exactly 6% of the principal
        assert_relative_eq!(
            adjusted.final_value().unwrap() - base.final_value().unwrap(),
            60.0,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_prefixed_monotonic_in_spread() {
        let base = base_series(&IPCA_2015, 1000.0);
        let low = adjust(&base, AdjustmentSpec::prefixed(4.0));
        let high = adjust(&base, AdjustmentSpec::prefixed(6.5));

        for (l, h) in low.rows().iter().zip(high.rows()) {
            assert!(h.adjusted_value > l.adjusted_value);
        }
    }

    #[test]
    fn test_adjust_empty_series() {
        let base = base_series(&[], 1000.0);
        for spec in [AdjustmentSpec::none(), AdjustmentSpec::prefixed(6.0), AdjustmentSpec::proportional(120.0)] {
            let adjusted = adjust(&base, spec);
            assert!(adjusted.is_empty());
            assert!(matches!(adjusted.final_value(), Err(IndexerError::EmptyRange)));
        }
    }
}
