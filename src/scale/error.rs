//! Scale error types

use thiserror::Error;

/// Errors that can occur while building a color scale
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScaleError {
    /// No region counts were available to derive breakpoints from
    #[error("No data available: region counts are empty")]
    NoData,

    /// Unknown boundary mode name
    #[error("Unknown boundary mode: {0} (expected 'exclusive' or 'inclusive-lower')")]
    UnknownBoundaryMode(String),
}

/// Result type for scale operations
pub type ScaleResult<T> = Result<T, ScaleError>;
