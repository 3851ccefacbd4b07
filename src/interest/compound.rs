//! Monthly compounding of percent rates
//!
//! Rates are always percent (1.0 = 1%) and always compound geometrically;
//! there is no additive approximation anywhere in the engine.

use log::debug;

use super::values::{ValueRow, ValueSeries};
use crate::series::RateSeries;

/// Growth factor of one period: `1 + rate/100`
#[inline]
pub fn growth_factor(rate_percent: f64) -> f64 {
    1.0 + rate_percent / 100.0
}

/// Principal compounded by every rate up to and including each period
///
/// `value[i] = initial_value * Π_{k<=i} (1 + rate[k]/100)`. The first value
/// already includes the first period's rate.
pub fn cumulative_values<I>(rates: I, initial_value: f64) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    rates
        .into_iter()
        .scan(1.0_f64, |product, rate| {
            *product *= growth_factor(rate);
            Some(*product * initial_value)
        })
        .collect()
}

/// Yearly rate (percent) from the twelve monthly rates of a calendar year
///
/// A missing month makes the year undefined: the result is `None`, never
/// the product of the months that do exist.
pub fn yearly_rate_from_monthly(monthly_rates: &[Option<f64>; 12]) -> Option<f64> {
    let product = monthly_rates
        .iter()
        .try_fold(1.0_f64, |acc, rate| rate.map(|r| acc * growth_factor(r)))?;
    Some((product - 1.0) * 100.0)
}

/// Constant monthly rate (percent) equivalent to an annual percent rate
pub fn monthly_rate_from_yearly(yearly_rate_percent: f64) -> f64 {
    (growth_factor(yearly_rate_percent).powf(1.0 / 12.0) - 1.0) * 100.0
}

/// Compound a (date-filtered) rate series from an initial principal
pub fn compound_series(series: &RateSeries, initial_value: f64) -> ValueSeries {
    let values = cumulative_values(series.rates(), initial_value);

    let rows = series
        .points()
        .iter()
        .zip(values)
        .map(|(point, value)| ValueRow {
            date: point.date,
            rate_percent: point.rate_percent,
            value,
        })
        .collect::<Vec<_>>();

    debug!(
        "Compounded {} {} periods from {:.2}",
        rows.len(),
        series.indicator(),
        initial_value
    );

    ValueSeries::new(series.indicator(), initial_value, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::Indicator;
    use crate::series::RatePoint;
    use approx::assert_relative_eq;

    #[test]
    fn test_two_months_at_one_percent() {
        let values = cumulative_values(vec![1.0, 1.0], 1000.0);
        assert_eq!(values.len(), 2);
        assert_relative_eq!(values[0], 1010.0, max_relative = 1e-12);
        assert_relative_eq!(values[1], 1020.1, max_relative = 1e-12);
    }

    #[test]
    fn test_compounding_matches_closed_form() {
        let rates = [0.62, 0.13, 0.22, 0.42, 0.01, 0.23, 1.61, 1.31, 0.23, 0.14, 0.32, 0.59];
        let initial = 2500.0;

        let values = cumulative_values(rates.iter().copied(), initial);
        let expected: f64 = initial * rates.iter().map(|r| 1.0 + r / 100.0).product::<f64>();

        assert_relative_eq!(*values.last().unwrap(), expected, max_relative = 1e-9);
        // Geometric, not additive
        let additive = initial * (1.0 + rates.iter().sum::<f64>() / 100.0);
        assert!(*values.last().unwrap() > additive);
    }

    #[test]
    fn test_negative_rates_deflate() {
        let values = cumulative_values(vec![-0.21, -0.38], 100.0);
        assert_relative_eq!(values[1], 100.0 * 0.9979 * 0.9962, max_relative = 1e-12);
    }

    #[test]
    fn test_empty_rates() {
        assert!(cumulative_values(Vec::<f64>::new(), 1000.0).is_empty());
    }

    #[test]
    fn test_yearly_rate_twelve_months() {
        let months = [Some(1.0); 12];
        let yearly = yearly_rate_from_monthly(&months).unwrap();
        assert_relative_eq!(yearly, (1.01_f64.powi(12) - 1.0) * 100.0, max_relative = 1e-12);
        assert!((yearly - 12.6825).abs() < 1e-4);
    }

    #[test]
    fn test_yearly_rate_missing_month_is_undefined() {
        let mut months = [Some(0.5); 12];
        months[11] = None;
        assert_eq!(yearly_rate_from_monthly(&months), None);

        // A zero month is data, not a gap
        months[11] = Some(0.0);
        assert!(yearly_rate_from_monthly(&months).is_some());
    }

    #[test]
    fn test_monthly_rate_from_yearly() {
        let monthly = monthly_rate_from_yearly(12.0);
        assert!((monthly - 0.9489).abs() < 1e-4);
        assert_relative_eq!(growth_factor(monthly).powi(12), 1.12, max_relative = 1e-12);
        assert_eq!(monthly_rate_from_yearly(0.0), 0.0);
    }

    #[test]
    fn test_compound_series_rows() {
        let points = vec![
            RatePoint::new(2020, 1, 1, 1.0).unwrap(),
            RatePoint::new(2020, 2, 1, 1.0).unwrap(),
        ];
        let series = RateSeries::new(Indicator::Selic, points).unwrap();

        let values = compound_series(&series, 1000.0);
        assert_eq!(values.len(), 2);
        assert_eq!(values.rows()[1].rate_percent, 1.0);
        assert_relative_eq!(values.last_value().unwrap(), 1020.1, max_relative = 1e-12);
    }
}
