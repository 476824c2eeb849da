//! Breakpoint computation and bucket lookup
//!
//! Breakpoints split `[0, max(counts) + 100]` into nine equal-width buckets.
//! The headroom keeps the largest region strictly inside the top bucket.

use super::error::{ScaleError, ScaleResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of color buckets on the map
pub const BUCKET_COUNT: usize = 9;

/// Number of thresholds delimiting the buckets
pub const BREAKPOINT_COUNT: usize = BUCKET_COUNT + 1;

/// Headroom added above the largest count
pub const HEADROOM: f64 = 100.0;

/// Fill used for regions without a matching bucket
pub const NO_DATA_COLOR: &str = "#c0c0c0";

/// Fixed diverging palette, coolest to hottest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScale {
    colors: [&'static str; BUCKET_COUNT],
}

impl ColorScale {
    pub const fn new(colors: [&'static str; BUCKET_COUNT]) -> Self {
        Self { colors }
    }

    /// Color for bucket `index`
    pub fn get(&self, index: usize) -> Option<&'static str> {
        self.colors.get(index).copied()
    }

    pub fn colors(&self) -> &[&'static str; BUCKET_COUNT] {
        &self.colors
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::new([
            "#4575b4", "#74add1", "#abd9e9", "#e0f3f8", "#ffffbf", "#fee090", "#fdae61",
            "#f46d43", "#d73027",
        ])
    }
}

/// How a count sitting exactly on a breakpoint is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryMode {
    /// `lower < count < upper`; counts on a breakpoint get no bucket
    #[default]
    Exclusive,
    /// `lower <= count < upper`
    InclusiveLower,
}

impl BoundaryMode {
    fn contains(&self, lower: f64, upper: f64, count: f64) -> bool {
        match self {
            BoundaryMode::Exclusive => lower < count && count < upper,
            BoundaryMode::InclusiveLower => lower <= count && count < upper,
        }
    }
}

impl fmt::Display for BoundaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryMode::Exclusive => write!(f, "exclusive"),
            BoundaryMode::InclusiveLower => write!(f, "inclusive-lower"),
        }
    }
}

impl FromStr for BoundaryMode {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exclusive" => Ok(BoundaryMode::Exclusive),
            "inclusive-lower" | "inclusive_lower" | "inclusive" => {
                Ok(BoundaryMode::InclusiveLower)
            }
            _ => Err(ScaleError::UnknownBoundaryMode(s.to_string())),
        }
    }
}

/// Result of looking up a count on the scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// Count fell inside bucket `index`
    Bucket { index: usize, color: &'static str },
    /// No region data, or the count matched no bucket
    NoData,
}

impl Fill {
    /// CSS color to paint with
    pub fn color(&self) -> &'static str {
        match self {
            Fill::Bucket { color, .. } => *color,
            Fill::NoData => NO_DATA_COLOR,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Fill::NoData)
    }
}

/// One row of the map legend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub lower: f64,
    pub upper: f64,
    pub color: &'static str,
}

/// Ten ascending thresholds, first is always 0
#[derive(Debug, Clone, PartialEq)]
pub struct Breakpoints {
    values: [f64; BREAKPOINT_COUNT],
}

impl Breakpoints {
    /// Derive breakpoints from the current region counts.
    ///
    /// Returns [`ScaleError::NoData`] when `counts` is empty.
    pub fn compute<I>(counts: I) -> ScaleResult<Self>
    where
        I: IntoIterator<Item = u64>,
    {
        let max = counts.into_iter().max().ok_or(ScaleError::NoData)?;

        let top = max as f64 + HEADROOM;
        let bottom = 0.0;
        let step = (top - bottom) / BUCKET_COUNT as f64;

        let mut values = [0.0; BREAKPOINT_COUNT];
        for (i, value) in values.iter_mut().enumerate() {
            *value = bottom + step * i as f64;
        }
        // step * 9 can land an ulp below top
        values[BREAKPOINT_COUNT - 1] = top;

        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64; BREAKPOINT_COUNT] {
        &self.values
    }

    /// Upper bound of the scale
    pub fn top(&self) -> f64 {
        self.values[BREAKPOINT_COUNT - 1]
    }

    /// Index of the bucket containing `count`, if any
    pub fn bucket_of(&self, count: u64, mode: BoundaryMode) -> Option<usize> {
        let count = count as f64;
        self.values
            .windows(2)
            .position(|pair| mode.contains(pair[0], pair[1], count))
    }

    /// Pick the fill for a region count
    pub fn fill_for(&self, count: u64, scale: &ColorScale, mode: BoundaryMode) -> Fill {
        self.bucket_of(count, mode)
            .and_then(|index| scale.get(index).map(|color| Fill::Bucket { index, color }))
            .unwrap_or(Fill::NoData)
    }

    /// Legend rows, one per bucket
    pub fn legend(&self, scale: &ColorScale) -> Vec<LegendEntry> {
        self.values
            .windows(2)
            .zip(scale.colors().iter().copied())
            .map(|(pair, color)| LegendEntry {
                lower: pair[0],
                upper: pair[1],
                color,
            })
            .collect()
    }
}

/// Compute breakpoints for a set of region counts
pub fn compute_breakpoints(counts: &[u64]) -> ScaleResult<Breakpoints> {
    Breakpoints::compute(counts.iter().copied())
}

/// Color for a region, or the no-data sentinel.
///
/// `count` is `None` when the feature has no region data.
pub fn color_for(
    count: Option<u64>,
    breakpoints: &Breakpoints,
    scale: &ColorScale,
    mode: BoundaryMode,
) -> Fill {
    match count {
        Some(count) => breakpoints.fill_for(count, scale, mode),
        None => Fill::NoData,
    }
}
