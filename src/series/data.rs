//! Monthly rate records and ordered per-indicator series

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{IndexerError, Result};
use crate::indicator::Indicator;

/// One calendar month's published rate for one indicator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    /// Reference date of the record (usually the first day of the month)
    pub date: NaiveDate,

    /// Monthly rate in percent (1.0 = 1%)
    pub rate_percent: f64,
}

impl RatePoint {
    /// Build a point from calendar parts, rejecting impossible dates
    pub fn new(year: i32, month: u32, day: u32, rate_percent: f64) -> Result<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| IndexerError::InvalidDate(format!("{:04}-{:02}-{:02}", year, month, day)))?;
        Ok(Self { date, rate_percent })
    }

    pub fn from_date(date: NaiveDate, rate_percent: f64) -> Self {
        Self { date, rate_percent }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    fn year_month(&self) -> (i32, u32) {
        (self.year(), self.month())
    }
}

/// Ordered rate records of a single indicator
///
/// Points are strictly increasing by date with at most one record per
/// (year, month). Missing months are allowed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateSeries {
    indicator: Indicator,
    points: Vec<RatePoint>,
}

impl RateSeries {
    /// Create a series, validating ordering and month uniqueness
    pub fn new(indicator: Indicator, points: Vec<RatePoint>) -> Result<Self> {
        for pair in points.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.year_month() == next.year_month() {
                return Err(IndexerError::InvalidSeries(format!(
                    "{} has more than one record for {:04}-{:02}",
                    indicator,
                    next.year(),
                    next.month()
                )));
            }
            if next.date <= prev.date {
                return Err(IndexerError::InvalidSeries(format!(
                    "{} records out of order: {} after {}",
                    indicator, next.date, prev.date
                )));
            }
        }
        Ok(Self { indicator, points })
    }

    /// Create an empty series for an indicator
    pub fn empty(indicator: Indicator) -> Self {
        Self { indicator, points: Vec::new() }
    }

    pub fn indicator(&self) -> Indicator {
        self.indicator
    }

    pub fn points(&self) -> &[RatePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&RatePoint> {
        self.points.last()
    }

    /// Monthly rates in percent, in date order
    pub fn rates(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.rate_percent)
    }

    /// Sub-series with `initial_date <= date <= final_date`
    ///
    /// An inverted window yields an empty series rather than an error.
    pub fn between(&self, initial_date: NaiveDate, final_date: NaiveDate) -> RateSeries {
        if initial_date > final_date {
            return RateSeries::empty(self.indicator);
        }
        let start = self.points.partition_point(|p| p.date < initial_date);
        let end = self.points.partition_point(|p| p.date <= final_date);
        RateSeries {
            indicator: self.indicator,
            points: self.points[start..end].to_vec(),
        }
    }

    /// Append a point after the current last record
    pub fn push(&mut self, point: RatePoint) -> Result<()> {
        if let Some(last) = self.points.last() {
            if point.year_month() <= last.year_month() {
                return Err(IndexerError::InvalidSeries(format!(
                    "{} already has data up to {}; cannot append {}",
                    self.indicator, last.date, point.date
                )));
            }
        }
        self.points.push(point);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn monthly_series(months: &[(i32, u32, f64)]) -> RateSeries {
        let points = months
            .iter()
            .map(|&(y, m, r)| RatePoint::new(y, m, 1, r).unwrap())
            .collect();
        RateSeries::new(Indicator::Ipca, points).unwrap()
    }

    #[test]
    fn test_rate_point_rejects_invalid_date() {
        assert!(RatePoint::new(2023, 2, 30, 0.5).is_err());
        assert!(RatePoint::new(2023, 13, 1, 0.5).is_err());

        let point = RatePoint::new(2023, 2, 1, 0.84).unwrap();
        assert_eq!((point.year(), point.month(), point.day()), (2023, 2, 1));
    }

    #[test]
    fn test_series_validation() {
        let dup = vec![
            RatePoint::new(2020, 1, 1, 0.2).unwrap(),
            RatePoint::new(2020, 1, 15, 0.3).unwrap(),
        ];
        assert!(matches!(
            RateSeries::new(Indicator::Cdi, dup),
            Err(IndexerError::InvalidSeries(_))
        ));

        let unordered = vec![
            RatePoint::new(2020, 2, 1, 0.2).unwrap(),
            RatePoint::new(2020, 1, 1, 0.3).unwrap(),
        ];
        assert!(RateSeries::new(Indicator::Cdi, unordered).is_err());
    }

    #[test]
    fn test_between_is_inclusive() {
        let series = monthly_series(&[(2000, 1, 0.62), (2000, 2, 0.13), (2000, 3, 0.22), (2000, 4, 0.42)]);

        let filtered = series.between(date(2000, 2, 1), date(2000, 3, 1));
        let rates: Vec<f64> = filtered.rates().collect();
        assert_eq!(rates, vec![0.13, 0.22]);
        assert_eq!(filtered.indicator(), Indicator::Ipca);

        // Window boundaries that fall between records
        let filtered = series.between(date(1999, 12, 15), date(2000, 1, 31));
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_between_inverted_or_outside_is_empty() {
        let series = monthly_series(&[(2000, 1, 0.62), (2000, 2, 0.13)]);

        assert!(series.between(date(2000, 2, 1), date(2000, 1, 1)).is_empty());
        assert!(series.between(date(2010, 1, 1), date(2011, 1, 1)).is_empty());
    }

    #[test]
    fn test_push_after_last_month() {
        let mut series = monthly_series(&[(1999, 12, 0.6), (2000, 1, 0.62), (2000, 2, 0.13)]);

        assert!(series.push(RatePoint::new(2000, 2, 15, 0.1).unwrap()).is_err());
        series.push(RatePoint::new(2000, 3, 1, 0.22).unwrap()).unwrap();
        assert_eq!(series.len(), 4);
    }
}
