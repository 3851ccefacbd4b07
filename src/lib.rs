//! ECONIndexer - compound-interest trajectories for Brazilian economic indicators
//!
//! This library provides:
//! - Monthly rate series for IPCA, CDI, SELIC, FGTS and POUPANCA (CSV store)
//! - Exact monthly compounding of an initial value over a date window
//! - Additional rates: prefixed annual spread or proportional multiplier
//! - Interest value, interest rate and benchmarking against CDI
//! - Yearly history tables and monthly record registration

pub mod error;
pub mod config;
pub mod indicator;
pub mod series;
pub mod interest;
pub mod service;

// Re-export commonly used types
pub use error::{IndexerError, Result};
pub use config::IndexerConfig;
pub use indicator::Indicator;
pub use series::{RatePoint, RateSeries, RateSeriesStore, InMemoryStore};
pub use interest::{AdjustmentSpec, RateType, ValueSeries, AdjustedValueSeries, SeriesSummary, InterestMetrics};
pub use service::IndexerService;
