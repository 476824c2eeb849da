//! Dashboard Filters
//!
//! Date-range and cause-of-death filters for the dashboard API.
//!
//! - [`DateRangeResolver`]: dropdown selection to concrete bounds
//! - [`DashboardQuery`]: immutable filter snapshot and query parameters

mod dates;
mod error;
mod query;

pub use dates::{parse_date, DateRange, DateRangeResolver, DateRangeSelection, DATE_FORMAT};
pub use error::{FilterError, FilterResult};
pub use query::DashboardQuery;
