//! Indicator rate series: records, CSV storage and registration

mod data;
mod store;
pub mod loader;
pub mod registration;

pub use data::{RatePoint, RateSeries};
pub use store::{InMemoryStore, RateSeriesStore};
pub use loader::{load_series, load_series_from_reader, load_store, save_series, save_store, series_path};
pub use registration::{register_month, next_register_date, is_registration_blocked, days_until_unblocked, REGISTER_LAG_DAYS};
