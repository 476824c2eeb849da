//! API Client Error Types
//!
//! Errors raised while talking to the dashboard analytics endpoint.

use thiserror::Error;

/// Errors that can occur when fetching dashboard data
#[derive(Error, Debug)]
pub enum ClientError {
    /// Backend could not be reached
    #[error("Dashboard API unavailable")]
    Unavailable,

    /// Request timed out
    #[error("Request timeout")]
    Timeout,

    /// Transport-level failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success status from the backend
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Classify a reqwest error the same way for every call
    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_connect() {
            ClientError::Unavailable
        } else if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Request(e)
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
