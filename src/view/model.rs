//! Derived view data
//!
//! Pure projections of a [`DashboardState`] into what the charts, map and
//! dropdowns display.

use super::state::DashboardState;
use crate::api::{CauseCount, DashboardPayload, UpdateStats};
use crate::filters::DateRangeSelection;
use crate::geo::{BorderType, Choropleth, StyledFeature};
use crate::scale::{BoundaryMode, LegendEntry, ScaleError};
use serde::Serialize;

/// Headline numbers shown above the charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Highlights {
    pub coded_vas: u64,
    pub uncoded_vas: u64,
}

impl Highlights {
    pub fn from_payload(payload: &DashboardPayload) -> Self {
        Self {
            coded_vas: payload.coded_vas(),
            uncoded_vas: payload.uncoded_vas,
        }
    }

    /// Labelled entries in display order
    pub fn entries(&self) -> [(&'static str, u64); 2] {
        [("Coded VAs", self.coded_vas), ("Uncoded VAs", self.uncoded_vas)]
    }
}

/// Province names followed by district names.
///
/// Empty until both series have been loaded.
pub fn locations(payload: &DashboardPayload) -> Vec<String> {
    match (
        &payload.geographic_province_sums,
        &payload.geographic_district_sums,
    ) {
        (Some(provinces), Some(districts)) => provinces
            .iter()
            .chain(districts.iter())
            .map(|r| r.region_name.clone())
            .collect(),
        _ => Vec::new(),
    }
}

/// Height of the cause-of-death chart for the available space.
///
/// A single bar gets half the height so it does not fill the panel.
pub fn cod_chart_height(available: u32, cause_count: usize) -> u32 {
    if cause_count == 1 {
        available / 2
    } else {
        available * 4 / 5
    }
}

/// Map layer contents
#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub border: BorderType,
    pub features: Vec<StyledFeature>,
    pub legend: Vec<LegendEntry>,
}

/// Everything a rendering surface needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    pub highlights: Highlights,
    pub update_stats: UpdateStats,
    pub cod_grouping: Vec<CauseCount>,
    pub cod_chart_height: u32,
    pub cod_trend: Option<serde_json::Value>,
    pub place_of_death: Option<serde_json::Value>,
    pub demographics: Option<serde_json::Value>,
    pub cause_options: Vec<String>,
    pub date_options: Vec<&'static str>,
    pub border_options: Vec<&'static str>,
    pub locations: Vec<String>,
    /// `None` until both data and boundaries are available
    pub map: Option<MapView>,
}

impl ViewModel {
    /// Project a state snapshot
    pub fn from_state(state: &DashboardState, mode: BoundaryMode) -> Self {
        let empty = DashboardPayload::default();
        let payload = state.payload.as_deref().unwrap_or(&empty);

        Self {
            highlights: Highlights::from_payload(payload),
            update_stats: payload.update_stats.clone(),
            cod_grouping: payload.cod_grouping.clone(),
            cod_chart_height: cod_chart_height(
                state.viewport.height,
                payload.cod_grouping.len(),
            ),
            cod_trend: payload.cod_trend.clone(),
            place_of_death: payload.place_of_death.clone(),
            demographics: payload.demographics.clone(),
            cause_options: state.cause_options.clone(),
            date_options: DateRangeSelection::labels(),
            border_options: BorderType::all().iter().map(|b| b.label()).collect(),
            locations: locations(payload),
            map: map_view(state, mode),
        }
    }
}

fn map_view(state: &DashboardState, mode: BoundaryMode) -> Option<MapView> {
    let payload = state.payload.as_deref()?;
    let boundaries = state.boundaries.as_deref()?;

    match Choropleth::build(payload, state.border, mode) {
        Ok(choropleth) => Some(MapView {
            border: state.border,
            features: choropleth.style_all(boundaries),
            legend: choropleth.legend(),
        }),
        Err(ScaleError::NoData) => {
            tracing::warn!(border = %state.border, "No region counts, map left blank");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "Could not build choropleth");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RegionCount;
    use crate::geo::{Boundaries, Feature};
    use crate::view::state::Viewport;
    use std::sync::Arc;

    fn payload() -> DashboardPayload {
        DashboardPayload {
            cod_grouping: vec![
                CauseCount {
                    cause: "Renal failure".into(),
                    count: 10,
                },
                CauseCount {
                    cause: "Liver cirrhosis".into(),
                    count: 32,
                },
            ],
            geographic_province_sums: Some(vec![RegionCount::new("Lusaka Province", 42)]),
            geographic_district_sums: Some(vec![
                RegionCount::new("Lusaka District", 30),
                RegionCount::new("Kafue District", 12),
            ]),
            uncoded_vas: 7,
            ..Default::default()
        }
    }

    #[test]
    fn test_highlights() {
        let highlights = Highlights::from_payload(&payload());
        assert_eq!(
            highlights.entries(),
            [("Coded VAs", 42), ("Uncoded VAs", 7)]
        );
    }

    #[test]
    fn test_locations() {
        assert_eq!(
            locations(&payload()),
            vec!["Lusaka Province", "Lusaka District", "Kafue District"]
        );

        let partial = DashboardPayload {
            geographic_district_sums: None,
            ..payload()
        };
        assert!(locations(&partial).is_empty());
    }

    #[test]
    fn test_cod_chart_height() {
        assert_eq!(cod_chart_height(500, 1), 250);
        assert_eq!(cod_chart_height(500, 2), 400);
        assert_eq!(cod_chart_height(500, 0), 400);
    }

    #[test]
    fn test_view_without_data() {
        let view = ViewModel::from_state(&DashboardState::new(), BoundaryMode::Exclusive);
        assert_eq!(view.highlights, Highlights::default());
        assert!(view.map.is_none());
        assert_eq!(view.date_options.len(), 5);
        assert_eq!(view.border_options, vec!["Province", "District"]);
    }

    #[test]
    fn test_view_with_map() {
        let state = DashboardState {
            payload: Some(Arc::new(payload())),
            boundaries: Some(Arc::new(Boundaries::new(vec![
                Feature::named("Zambia", "Country"),
                Feature::named("Lusaka", "Province"),
                Feature::named("Kafue", "District"),
            ]))),
            viewport: Viewport::new(800, 600),
            ..Default::default()
        };

        let view = ViewModel::from_state(&state, BoundaryMode::Exclusive);
        assert_eq!(view.cod_chart_height, 480);
        assert_eq!(view.highlights.coded_vas, 42);

        let map = view.map.unwrap();
        assert_eq!(map.border, BorderType::Province);
        assert_eq!(map.features.len(), 2);
        assert_eq!(map.legend.len(), 9);
    }
}
