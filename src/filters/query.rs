//! Dashboard query filters
//!
//! Immutable snapshot of the filter dropdowns. Each change produces a new
//! query; nothing here is mutated in place.

use super::dates::{DateRange, DateRangeResolver, DateRangeSelection};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Filter state sent with every dashboard request
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardQuery {
    /// Death-date dropdown selection
    pub date_selection: DateRangeSelection,
    /// Custom start bound, only used with [`DateRangeSelection::Custom`]
    #[serde(default)]
    pub custom_start: String,
    /// Custom end bound, only used with [`DateRangeSelection::Custom`]
    #[serde(default)]
    pub custom_end: String,
    /// Cause of death filter, empty for all causes
    #[serde(default)]
    pub cause: String,
}

impl DashboardQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the date selection
    pub fn date_selection(mut self, selection: DateRangeSelection) -> Self {
        self.date_selection = selection;
        self
    }

    /// Builder method: set custom bounds
    pub fn custom_range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.custom_start = start.into();
        self.custom_end = end.into();
        self
    }

    /// Builder method: filter by cause of death
    pub fn cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = cause.into();
        self
    }

    /// Default filters ("Any Time", all causes)
    pub fn reset() -> Self {
        Self::default()
    }

    /// Resolve the date bounds against `today`
    pub fn date_range(&self, today: NaiveDate) -> DateRange {
        DateRangeResolver::resolve(
            self.date_selection,
            today,
            Some(self.custom_start.as_str()),
            Some(self.custom_end.as_str()),
        )
    }

    /// Query-string parameters for the dashboard endpoint
    pub fn to_params(&self, today: NaiveDate) -> Vec<(&'static str, String)> {
        let DateRange {
            start_date,
            end_date,
        } = self.date_range(today);

        vec![
            ("start_date", start_date),
            ("end_date", end_date),
            ("cause_of_death", self.cause.clone()),
        ]
    }
}
