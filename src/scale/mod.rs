//! Choropleth Color Scale
//!
//! Buckets geographic region counts into a fixed nine-color palette.
//!
//! ## Flow
//!
//! 1. [`Breakpoints::compute`] derives ten thresholds from the active counts
//! 2. [`Breakpoints::fill_for`] maps a single count to a [`Fill`]
//! 3. Regions without data, or counts that match no bucket, get
//!    [`NO_DATA_COLOR`]

mod breakpoints;
mod error;

pub use breakpoints::{
    color_for, compute_breakpoints, BoundaryMode, Breakpoints, ColorScale, Fill, LegendEntry,
    BREAKPOINT_COUNT, BUCKET_COUNT, HEADROOM, NO_DATA_COLOR,
};
pub use error::{ScaleError, ScaleResult};
