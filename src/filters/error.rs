//! Filter error types

use thiserror::Error;

/// Errors raised while building dashboard query filters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Date selection label outside the closed set of dropdown options
    #[error("Unknown date range selection: {0:?}")]
    UnknownSelection(String),

    /// A date string could not be parsed as YYYY-MM-DD
    #[error("Invalid date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
