//! Dashboard API
//!
//! Typed client for the VA analytics backend.
//!
//! ## Endpoint
//!
//! ```text
//! GET /va_analytics/api/dashboard?start_date=&end_date=&cause_of_death=
//! ```
//!
//! Empty parameters mean "no filter". The response carries cause-of-death
//! counts, chart data, per-province and per-district sums, and update stats.

mod client;
mod dto;
mod error;

pub use client::{ClientConfig, DashboardClient, CSRF_HEADER};
pub use dto::{CauseCount, DashboardPayload, RegionCount, UpdateStats};
pub use error::{ClientError, ClientResult};

use crate::filters::DashboardQuery;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Anything that can answer a dashboard query
#[async_trait]
pub trait DashboardSource: Send + Sync {
    /// Fetch statistics for the given filters
    async fn fetch(
        &self,
        query: &DashboardQuery,
        today: NaiveDate,
    ) -> ClientResult<DashboardPayload>;
}
