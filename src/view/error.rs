//! View error types

use crate::api::ClientError;
use thiserror::Error;

/// Errors surfaced by the dashboard controller
#[derive(Error, Debug)]
pub enum ViewError {
    /// Fetching dashboard data failed
    #[error("Fetch failed: {0}")]
    Client(#[from] ClientError),

    /// The rendering surface rejected a frame
    #[error("Render error: {0}")]
    Render(String),
}

impl From<std::io::Error> for ViewError {
    fn from(e: std::io::Error) -> Self {
        ViewError::Render(e.to_string())
    }
}

/// Result type for view operations
pub type ViewResult<T> = Result<T, ViewError>;
