//! Geo error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading boundaries or choosing a border level
#[derive(Error, Debug)]
pub enum GeoError {
    #[error("Failed to read boundary file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse boundary file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Unknown border type: {0} (expected Province or District)")]
    UnknownBorder(String),
}

/// Result type for geo operations
pub type GeoResult<T> = Result<T, GeoError>;
