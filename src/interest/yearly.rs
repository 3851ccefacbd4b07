//! Year by month history table with a compounded yearly rate column

use std::collections::BTreeMap;

use serde::Serialize;

use super::compound::yearly_rate_from_monthly;
use crate::indicator::Indicator;
use crate::series::RateSeries;

/// Month names as shown on the dashboard, January first
pub const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Name of a month (1-12)
pub fn month_name(month: u32) -> Option<&'static str> {
    let idx = month.checked_sub(1)? as usize;
    MONTH_NAMES.get(idx).copied()
}

/// One calendar year of monthly rates (percent)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyRow {
    pub year: i32,
    /// January..December; `None` where no record exists
    pub months: [Option<f64>; 12],
    /// Compounded yearly rate; `None` unless all twelve months exist
    pub yearly_rate: Option<f64>,
}

/// History table of an indicator, most recent year first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyRateTable {
    pub indicator: Indicator,
    pub rows: Vec<YearlyRow>,
}

impl YearlyRateTable {
    pub fn from_series(series: &RateSeries) -> Self {
        let mut by_year: BTreeMap<i32, [Option<f64>; 12]> = BTreeMap::new();
        for point in series.points() {
            let months = by_year.entry(point.year()).or_insert([None; 12]);
            months[point.month() as usize - 1] = Some(point.rate_percent);
        }

        let rows = by_year
            .into_iter()
            .rev()
            .map(|(year, months)| YearlyRow {
                year,
                yearly_rate: yearly_rate_from_monthly(&months),
                months,
            })
            .collect();

        Self {
            indicator: series.indicator(),
            rows,
        }
    }

    /// Row for a given year
    pub fn year(&self, year: i32) -> Option<&YearlyRow> {
        self.rows.iter().find(|r| r.year == year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::RatePoint;
    use approx::assert_relative_eq;

    fn series_2021_full_2022_partial() -> RateSeries {
        let mut points: Vec<RatePoint> = (1..=12)
            .map(|m| RatePoint::new(2021, m, 1, 1.0).unwrap())
            .collect();
        points.push(RatePoint::new(2022, 1, 1, 0.54).unwrap());
        points.push(RatePoint::new(2022, 2, 1, 1.01).unwrap());
        RateSeries::new(Indicator::Ipca, points).unwrap()
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), Some("Janeiro"));
        assert_eq!(month_name(12), Some("Dezembro"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn test_table_rows_descending() {
        let table = YearlyRateTable::from_series(&series_2021_full_2022_partial());
        let years: Vec<i32> = table.rows.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2022, 2021]);
    }

    #[test]
    fn test_full_year_has_yearly_rate() {
        let table = YearlyRateTable::from_series(&series_2021_full_2022_partial());
        let row = table.year(2021).unwrap();
        assert_relative_eq!(row.yearly_rate.unwrap(), 12.682503013196972, max_relative = 1e-9);
    }

    #[test]
    fn test_partial_year_is_undefined() {
        let table = YearlyRateTable::from_series(&series_2021_full_2022_partial());
        let row = table.year(2022).unwrap();
        assert_eq!(row.months[0], Some(0.54));
        assert_eq!(row.months[2], None);
        assert_eq!(row.yearly_rate, None);
    }
}
