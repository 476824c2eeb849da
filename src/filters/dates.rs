//! Death-date range resolution
//!
//! Turns the "Date of Death" dropdown selection into the `start_date` /
//! `end_date` pair the dashboard API expects. Empty strings mean "no bound".

use super::error::{FilterError, FilterResult};
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Format used on the wire for both bounds
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Relative-time options offered by the death-date dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DateRangeSelection {
    #[default]
    #[serde(rename = "Any Time")]
    AnyTime,
    #[serde(rename = "Within 1 Month")]
    WithinOneMonth,
    #[serde(rename = "Within 3 months")]
    WithinThreeMonths,
    #[serde(rename = "Within 1 year")]
    WithinOneYear,
    #[serde(rename = "Custom")]
    Custom,
}

impl DateRangeSelection {
    /// All selections in dropdown order
    pub fn all() -> &'static [DateRangeSelection] {
        &[
            DateRangeSelection::AnyTime,
            DateRangeSelection::WithinOneMonth,
            DateRangeSelection::WithinThreeMonths,
            DateRangeSelection::WithinOneYear,
            DateRangeSelection::Custom,
        ]
    }

    /// Dropdown labels in display order
    pub fn labels() -> Vec<&'static str> {
        Self::all().iter().map(|s| s.label()).collect()
    }

    /// Exact label shown in the dropdown
    pub fn label(&self) -> &'static str {
        match self {
            DateRangeSelection::AnyTime => "Any Time",
            DateRangeSelection::WithinOneMonth => "Within 1 Month",
            DateRangeSelection::WithinThreeMonths => "Within 3 months",
            DateRangeSelection::WithinOneYear => "Within 1 year",
            DateRangeSelection::Custom => "Custom",
        }
    }

    /// Calendar months to look back, for the relative selections
    pub fn months_back(&self) -> Option<u32> {
        match self {
            DateRangeSelection::WithinOneMonth => Some(1),
            DateRangeSelection::WithinThreeMonths => Some(3),
            DateRangeSelection::WithinOneYear => Some(12),
            DateRangeSelection::AnyTime | DateRangeSelection::Custom => None,
        }
    }
}

impl fmt::Display for DateRangeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DateRangeSelection {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|selection| selection.label() == s)
            .copied()
            .ok_or_else(|| FilterError::UnknownSelection(s.to_string()))
    }
}

/// Concrete bounds sent to the API
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

impl DateRange {
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }

    /// Range with no bounds at all
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.start_date.is_empty() && self.end_date.is_empty()
    }
}

/// Resolves dropdown selections against a reference date
pub struct DateRangeResolver;

impl DateRangeResolver {
    /// Resolve a typed selection.
    ///
    /// Relative selections subtract calendar months from `today` (clamping
    /// to the last day of a shorter month) and leave the end open. Custom
    /// bounds are passed through untouched.
    pub fn resolve(
        selection: DateRangeSelection,
        today: NaiveDate,
        custom_start: Option<&str>,
        custom_end: Option<&str>,
    ) -> DateRange {
        match selection {
            DateRangeSelection::AnyTime => DateRange::unbounded(),
            DateRangeSelection::Custom => DateRange::new(
                custom_start.unwrap_or_default(),
                custom_end.unwrap_or_default(),
            ),
            relative => {
                let months = relative.months_back().unwrap_or_default();
                // Before the first representable date there is no lower bound
                let start = today
                    .checked_sub_months(Months::new(months))
                    .map(|d| d.format(DATE_FORMAT).to_string())
                    .unwrap_or_default();
                DateRange::new(start, "")
            }
        }
    }

    /// Resolve a raw dropdown label.
    ///
    /// Labels outside the closed set are a caller bug and fail with
    /// [`FilterError::UnknownSelection`].
    pub fn resolve_label(
        label: &str,
        today: NaiveDate,
        custom_start: Option<&str>,
        custom_end: Option<&str>,
    ) -> FilterResult<DateRange> {
        let selection: DateRangeSelection = label.parse()?;
        tracing::debug!(selection = %selection, %today, "Resolving date range");
        Ok(Self::resolve(selection, today, custom_start, custom_end))
    }
}

/// Parse a YYYY-MM-DD date
pub fn parse_date(s: &str) -> FilterResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| FilterError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_any_time_is_unbounded() {
        for today in [date(2024, 3, 15), date(1999, 12, 31), date(2030, 1, 1)] {
            let range = DateRangeResolver::resolve_label("Any Time", today, None, None).unwrap();
            assert_eq!(range, DateRange::new("", ""));
            assert!(range.is_unbounded());
        }
    }

    #[test]
    fn test_within_one_month() {
        let range =
            DateRangeResolver::resolve_label("Within 1 Month", date(2024, 3, 15), None, None)
                .unwrap();
        assert_eq!(range, DateRange::new("2024-02-15", ""));
    }

    #[test]
    fn test_within_three_months_crosses_year() {
        let range =
            DateRangeResolver::resolve_label("Within 3 months", date(2024, 2, 10), None, None)
                .unwrap();
        assert_eq!(range.start_date, "2023-11-10");
        assert_eq!(range.end_date, "");
    }

    #[test]
    fn test_within_one_year() {
        let range =
            DateRangeResolver::resolve_label("Within 1 year", date(2024, 3, 15), None, None)
                .unwrap();
        assert_eq!(range, DateRange::new("2023-03-15", ""));
    }

    #[test]
    fn test_month_end_clamps() {
        let range = DateRangeResolver::resolve(
            DateRangeSelection::WithinOneMonth,
            date(2024, 3, 31),
            None,
            None,
        );
        assert_eq!(range.start_date, "2024-02-29");

        let range = DateRangeResolver::resolve(
            DateRangeSelection::WithinOneYear,
            date(2024, 2, 29),
            None,
            None,
        );
        assert_eq!(range.start_date, "2023-02-28");
    }

    #[test]
    fn test_custom_passes_through() {
        let range = DateRangeResolver::resolve_label(
            "Custom",
            date(2024, 3, 15),
            Some("2024-01-01"),
            Some("2024-02-01"),
        )
        .unwrap();
        assert_eq!(range, DateRange::new("2024-01-01", "2024-02-01"));

        // no reformatting or validation
        let range = DateRangeResolver::resolve(
            DateRangeSelection::Custom,
            date(2024, 3, 15),
            Some("01/02/2024"),
            None,
        );
        assert_eq!(range, DateRange::new("01/02/2024", ""));
    }

    #[test]
    fn test_underflow_leaves_start_open() {
        let range = DateRangeResolver::resolve(
            DateRangeSelection::WithinOneYear,
            NaiveDate::MIN,
            None,
            None,
        );
        assert!(range.is_unbounded());
    }

    #[test]
    fn test_unknown_label() {
        let err = DateRangeResolver::resolve_label("Last week", date(2024, 3, 15), None, None)
            .unwrap_err();
        assert_eq!(err, FilterError::UnknownSelection("Last week".to_string()));

        // labels are matched exactly
        assert!("within 1 month".parse::<DateRangeSelection>().is_err());
    }

    #[test]
    fn test_labels_round_trip() {
        assert_eq!(
            DateRangeSelection::labels(),
            vec!["Any Time", "Within 1 Month", "Within 3 months", "Within 1 year", "Custom"]
        );
        for selection in DateRangeSelection::all() {
            assert_eq!(selection.to_string().parse::<DateRangeSelection>().unwrap(), *selection);
        }
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-03-15").unwrap(), date(2024, 3, 15));
        assert!(matches!(parse_date("15/03/2024"), Err(FilterError::InvalidDate(_))));
    }
}
