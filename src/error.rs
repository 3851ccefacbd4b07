//! Error types shared by the calculation engine, the store and the service layer

use chrono::NaiveDate;
use thiserror::Error;

use crate::indicator::Indicator;

/// Errors surfaced by indexer calculations and lookups
#[derive(Debug, Error)]
pub enum IndexerError {
    /// Indicator name is not one of IPCA, CDI, SELIC, FGTS or POUPANCA
    #[error("invalid indicator reference: '{0}'")]
    InvalidIndicator(String),

    /// Benchmarking is only available against a subset of indicators
    #[error("benchmarking is not implemented for indicator {0}")]
    UnsupportedBenchmark(Indicator),

    /// A ratio was requested with a zero denominator
    #[error("division by zero while computing {0}")]
    DivisionByZero(&'static str),

    /// The date window selects no rate records
    #[error("no rate records in the requested date range")]
    EmptyRange,

    /// Additional rate type code outside 0=None, 1=Prefixed, 2=Proportional
    #[error("invalid rate type code {0} (expected 0, 1 or 2)")]
    InvalidRateType(i64),

    /// Unparseable or out-of-calendar date
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Series violates ordering or one-record-per-month
    #[error("invalid rate series: {0}")]
    InvalidSeries(String),

    /// Store holds no series for the indicator
    #[error("no rate series loaded for indicator {0}")]
    MissingSeries(Indicator),

    /// New monthly record requested inside the publication lag window
    #[error("registration blocked until {days} more day(s) have passed since {last_date}")]
    RegistrationBlocked { last_date: NaiveDate, days: i64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl IndexerError {
    /// Stable machine-readable code for structured error responses
    pub fn code(&self) -> &'static str {
        match self {
            IndexerError::InvalidIndicator(_) => "invalid_indicator",
            IndexerError::UnsupportedBenchmark(_) => "unsupported_benchmark",
            IndexerError::DivisionByZero(_) => "division_by_zero",
            IndexerError::EmptyRange => "empty_range",
            IndexerError::InvalidRateType(_) => "invalid_rate_type",
            IndexerError::InvalidDate(_) => "invalid_date",
            IndexerError::InvalidSeries(_) => "invalid_series",
            IndexerError::MissingSeries(_) => "missing_series",
            IndexerError::RegistrationBlocked { .. } => "registration_blocked",
            IndexerError::Io(_) => "io",
            IndexerError::Csv(_) => "csv",
        }
    }

    /// HTTP status the service boundary reports for this error
    pub fn status_code(&self) -> u16 {
        match self {
            IndexerError::InvalidIndicator(_) => 500,
            IndexerError::UnsupportedBenchmark(_) => 501,
            IndexerError::DivisionByZero(_) => 500,
            IndexerError::EmptyRange => 422,
            IndexerError::InvalidRateType(_) | IndexerError::InvalidDate(_) => 400,
            IndexerError::RegistrationBlocked { .. } => 409,
            IndexerError::InvalidSeries(_)
            | IndexerError::MissingSeries(_)
            | IndexerError::Io(_)
            | IndexerError::Csv(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, IndexerError>;
