//! Indexer calculation engine: compounding, rate adjustment and interest metrics

mod values;
mod compound;
mod adjustment;
mod metrics;
mod yearly;

pub use values::{ValueRow, ValueSeries, AdjustedRow, AdjustedValueSeries, SeriesSummary};
pub use compound::{growth_factor, cumulative_values, yearly_rate_from_monthly, monthly_rate_from_yearly, compound_series};
pub use adjustment::{RateType, AdjustmentSpec, adjust};
pub use metrics::{InterestMetrics, interest_value, interest_rate, benchmarking_ratio, monthly_equivalent, yearly_equivalent};
pub use yearly::{YearlyRateTable, YearlyRow, MONTH_NAMES, month_name};
