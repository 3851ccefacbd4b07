//! Interest value, interest rate and benchmarking metrics
//!
//! Rates in this module are fractions (0.05 = 5%), unlike the percent
//! rates of indicator series.

use serde::{Deserialize, Serialize};

use crate::error::{IndexerError, Result};

/// Final minus initial value
pub fn interest_value(initial_value: f64, final_value: f64) -> f64 {
    final_value - initial_value
}

/// Interest value relative to the initial value
pub fn interest_rate(initial_value: f64, final_value: f64) -> Result<f64> {
    if initial_value == 0.0 {
        return Err(IndexerError::DivisionByZero("interest rate"));
    }
    Ok(interest_value(initial_value, final_value) / initial_value)
}

/// User's interest value divided by the indicator's interest value
pub fn benchmarking_ratio(
    user_initial_value: f64,
    user_final_value: f64,
    indexer_interest_value: f64,
) -> Result<f64> {
    if indexer_interest_value == 0.0 {
        return Err(IndexerError::DivisionByZero("benchmarking ratio"));
    }
    Ok(interest_value(user_initial_value, user_final_value) / indexer_interest_value)
}

/// Constant monthly rate that compounds to `total_interest_rate` over `total_months`
pub fn monthly_equivalent(total_months: u32, total_interest_rate: f64) -> Result<f64> {
    if total_months == 0 {
        return Err(IndexerError::EmptyRange);
    }
    Ok((1.0 + total_interest_rate).powf(1.0 / total_months as f64) - 1.0)
}

/// Annual rate from a constant monthly rate
pub fn yearly_equivalent(monthly_rate: f64) -> f64 {
    (1.0 + monthly_rate).powi(12) - 1.0
}

/// Scalar aggregates of one (initial, final) pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterestMetrics {
    pub interest_value: f64,
    pub interest_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmarking_ratio: Option<f64>,
}

impl InterestMetrics {
    pub fn from_values(initial_value: f64, final_value: f64) -> Result<Self> {
        Ok(Self {
            interest_value: interest_value(initial_value, final_value),
            interest_rate: interest_rate(initial_value, final_value)?,
            benchmarking_ratio: None,
        })
    }

    /// Metrics of a user's investment compared against an indicator's interest value
    pub fn benchmarked(
        initial_value: f64,
        final_value: f64,
        indexer_interest_value: f64,
    ) -> Result<Self> {
        Ok(Self {
            benchmarking_ratio: Some(benchmarking_ratio(
                initial_value,
                final_value,
                indexer_interest_value,
            )?),
            ..Self::from_values(initial_value, final_value)?
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_interest_value_and_rate() {
        assert_eq!(interest_value(1000.0, 1500.0), 500.0);
        assert_eq!(interest_value(1000.0, 800.0), -200.0);
        assert_relative_eq!(interest_rate(1000.0, 1500.0).unwrap(), 0.5);
    }

    #[test]
    fn test_interest_rate_zero_initial() {
        for final_value in [0.0, 100.0, -3.5] {
            assert!(matches!(
                interest_rate(0.0, final_value),
                Err(IndexerError::DivisionByZero(_))
            ));
        }
    }

    #[test]
    fn test_interest_value_round_trip() {
        let (initial, final_value) = (1234.56, 2000.01);
        let gain = interest_value(initial, final_value);
        assert_relative_eq!(interest_value(initial, gain + initial), gain, max_relative = 1e-12);
    }

    #[test]
    fn test_benchmarking_ratio() {
        // User earned 300 while the indicator earned 250
        assert_relative_eq!(benchmarking_ratio(1000.0, 1300.0, 250.0).unwrap(), 1.2);
        assert!(matches!(
            benchmarking_ratio(1000.0, 1300.0, 0.0),
            Err(IndexerError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_annualization() {
        let monthly = monthly_equivalent(12, 0.12).unwrap();
        assert_relative_eq!(yearly_equivalent(monthly), 0.12, max_relative = 1e-12);

        let monthly = monthly_equivalent(24, 1.01_f64.powi(24) - 1.0).unwrap();
        assert_relative_eq!(monthly, 0.01, max_relative = 1e-9);

        assert!(matches!(monthly_equivalent(0, 0.1), Err(IndexerError::EmptyRange)));
    }

    #[test]
    fn test_metrics_struct() {
        let metrics = InterestMetrics::from_values(1000.0, 1100.0).unwrap();
        assert_relative_eq!(metrics.interest_value, 100.0, max_relative = 1e-12);
        assert_eq!(metrics.benchmarking_ratio, None);

        let benchmarked = InterestMetrics::benchmarked(1000.0, 1100.0, 50.0).unwrap();
        assert_relative_eq!(benchmarked.benchmarking_ratio.unwrap(), 2.0, max_relative = 1e-12);
        assert!(InterestMetrics::from_values(0.0, 1.0).is_err());
    }
}
