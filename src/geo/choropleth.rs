//! Choropleth styling
//!
//! Binds the active region counts to the color scale and derives a style
//! for every visible boundary feature.

use super::boundaries::{Boundaries, BorderType, Feature};
use crate::api::DashboardPayload;
use crate::scale::{
    color_for, BoundaryMode, Breakpoints, ColorScale, Fill, LegendEntry, ScaleError, ScaleResult,
};
use serde::Serialize;
use std::collections::HashMap;

/// Stroke color of the national outline
pub const OUTLINE_COLOR: &str = "grey";

/// Leaflet-style path options for one feature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureStyle {
    pub stroke: bool,
    pub weight: f64,
    pub color: String,
    pub opacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
}

impl FeatureStyle {
    /// Unfilled grey outline for the country border
    pub fn outline() -> Self {
        Self {
            stroke: true,
            weight: 2.5,
            color: OUTLINE_COLOR.to_string(),
            opacity: 1.0,
            fill_color: None,
            fill_opacity: None,
        }
    }

    /// Filled region, stroke matches the fill
    pub fn region(fill: Fill) -> Self {
        let color = fill.color().to_string();
        Self {
            stroke: true,
            weight: 2.0,
            color: color.clone(),
            opacity: 1.0,
            fill_color: Some(color),
            fill_opacity: Some(0.7),
        }
    }
}

/// A visible feature together with its computed style
#[derive(Debug, Clone, Serialize)]
pub struct StyledFeature {
    pub region: String,
    pub count: Option<u64>,
    pub fill: Option<&'static str>,
    pub style: FeatureStyle,
}

/// Color mapping for one border level and one payload
#[derive(Debug, Clone)]
pub struct Choropleth {
    border: BorderType,
    mode: BoundaryMode,
    scale: ColorScale,
    breakpoints: Breakpoints,
    counts: HashMap<String, u64>,
}

impl Choropleth {
    /// Build the mapping for `border` from the payload's region sums.
    ///
    /// Fails with [`ScaleError::NoData`] when that level has no counts.
    pub fn build(
        payload: &DashboardPayload,
        border: BorderType,
        mode: BoundaryMode,
    ) -> ScaleResult<Self> {
        let sums = border.sums(payload).ok_or(ScaleError::NoData)?;
        let breakpoints = Breakpoints::compute(sums.iter().map(|r| r.count))?;

        let counts = sums
            .iter()
            .map(|r| (r.region_name.clone(), r.count))
            .collect();

        tracing::debug!(
            border = %border,
            regions = sums.len(),
            top = breakpoints.top(),
            "Built choropleth scale"
        );

        Ok(Self {
            border,
            mode,
            scale: ColorScale::default(),
            breakpoints,
            counts,
        })
    }

    pub fn border(&self) -> BorderType {
        self.border
    }

    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    /// Count recorded for a feature, if any
    pub fn count_for(&self, feature: &Feature) -> Option<u64> {
        self.counts.get(&feature.region_key()).copied()
    }

    /// Fill for a region feature
    pub fn fill_for(&self, feature: &Feature) -> Fill {
        color_for(
            self.count_for(feature),
            &self.breakpoints,
            &self.scale,
            self.mode,
        )
    }

    /// Style for any visible feature
    pub fn style_for(&self, feature: &Feature) -> FeatureStyle {
        if feature.is_country() {
            FeatureStyle::outline()
        } else {
            FeatureStyle::region(self.fill_for(feature))
        }
    }

    /// Style every feature visible at this border level
    pub fn style_all(&self, boundaries: &Boundaries) -> Vec<StyledFeature> {
        boundaries
            .visible(self.border)
            .features
            .iter()
            .map(|feature| StyledFeature {
                region: feature.region_key(),
                count: self.count_for(feature),
                fill: (!feature.is_country()).then(|| self.fill_for(feature).color()),
                style: self.style_for(feature),
            })
            .collect()
    }

    pub fn legend(&self) -> Vec<LegendEntry> {
        self.breakpoints.legend(&self.scale)
    }
}
