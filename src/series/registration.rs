//! Monthly registration of new indicator records
//!
//! Every indicator receives one record per month. The figures for a month
//! are only fully published about two and a half months after its reference
//! date, so a new record is blocked until `REGISTER_LAG_DAYS` have passed
//! since the last registered date.

use std::collections::HashMap;

use chrono::{Months, NaiveDate};
use log::info;

use super::{InMemoryStore, RatePoint, RateSeriesStore};
use crate::error::{IndexerError, Result};
use crate::indicator::Indicator;

/// Days between a record's reference date and the next registration
pub const REGISTER_LAG_DAYS: i64 = 75;

/// Reference date of the record following `last_date`
pub fn next_register_date(last_date: NaiveDate) -> Result<NaiveDate> {
    last_date
        .checked_add_months(Months::new(1))
        .ok_or_else(|| IndexerError::InvalidDate(format!("no month after {}", last_date)))
}

/// Days left before a new record may be registered (non-positive once allowed)
pub fn days_until_unblocked(last_date: NaiveDate, today: NaiveDate) -> i64 {
    REGISTER_LAG_DAYS - (today - last_date).num_days()
}

pub fn is_registration_blocked(last_date: NaiveDate, today: NaiveDate) -> bool {
    days_until_unblocked(last_date, today) > 0
}

/// Register one monthly rate per indicator at the next reference date
///
/// The IPCA series drives the calendar, as every series is registered
/// together. `rates` must hold exactly one value per indicator. The new
/// month is appended to a staged copy of the store, which replaces `store`
/// only once every series accepted it.
pub fn register_month(
    store: &mut InMemoryStore,
    rates: &[(Indicator, f64)],
    today: NaiveDate,
) -> Result<NaiveDate> {
    let last_date = store
        .snapshot(Indicator::Ipca)?
        .last()
        .map(|p| p.date)
        .ok_or(IndexerError::EmptyRange)?;

    if is_registration_blocked(last_date, today) {
        return Err(IndexerError::RegistrationBlocked {
            last_date,
            days: days_until_unblocked(last_date, today),
        });
    }

    let mut by_indicator: HashMap<Indicator, f64> = HashMap::with_capacity(rates.len());
    for &(indicator, rate) in rates {
        if by_indicator.insert(indicator, rate).is_some() {
            return Err(IndexerError::InvalidSeries(format!("more than one rate for {}", indicator)));
        }
    }

    let next_date = next_register_date(last_date)?;
    let mut staged = store.clone();
    for indicator in Indicator::ALL {
        let rate = by_indicator
            .get(&indicator)
            .copied()
            .ok_or_else(|| IndexerError::InvalidSeries(format!("missing rate for {}", indicator)))?;
        staged.append(indicator, RatePoint::from_date(next_date, rate))?;
    }

    *store = staged;
    for &(indicator, rate) in rates {
        info!("Registered {} {:.4}% for {}", indicator, rate, next_date);
    }

    Ok(next_date)
}
