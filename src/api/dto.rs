//! Data Transfer Objects
//!
//! Response types for the dashboard analytics endpoint.
//! Field names follow the backend's JSON exactly.

use serde::{Deserialize, Serialize};

// ============================================
// DASHBOARD PAYLOAD
// ============================================

/// Full response of `GET /va_analytics/api/dashboard`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardPayload {
    /// Coded VA counts per cause of death
    #[serde(rename = "COD_grouping", default)]
    pub cod_grouping: Vec<CauseCount>,
    /// Cause-of-death trend chart data (passed to the renderer as-is)
    #[serde(rename = "COD_trend", default)]
    pub cod_trend: Option<serde_json::Value>,
    /// Place-of-death chart data
    #[serde(default)]
    pub place_of_death: Option<serde_json::Value>,
    /// Demographics chart data
    #[serde(default)]
    pub demographics: Option<serde_json::Value>,
    /// Coded VA counts per province
    #[serde(default)]
    pub geographic_province_sums: Option<Vec<RegionCount>>,
    /// Coded VA counts per district
    #[serde(default)]
    pub geographic_district_sums: Option<Vec<RegionCount>>,
    /// VAs awaiting a cause of death
    #[serde(default)]
    pub uncoded_vas: u64,
    /// Data freshness
    #[serde(default)]
    pub update_stats: UpdateStats,
}

impl DashboardPayload {
    /// Total coded VAs across all causes
    pub fn coded_vas(&self) -> u64 {
        self.cod_grouping.iter().map(|c| c.count).sum()
    }
}

/// Count of coded VAs for one cause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CauseCount {
    pub cause: String,
    pub count: u64,
}

/// Aggregate count for one geographic unit.
///
/// The backend keys provinces by `province_name` and districts by
/// `district_name`; both land in `region_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCount {
    #[serde(alias = "province_name", alias = "district_name")]
    pub region_name: String,
    pub count: u64,
}

impl RegionCount {
    pub fn new(region_name: impl Into<String>, count: u64) -> Self {
        Self {
            region_name: region_name.into(),
            count,
        }
    }
}

/// Timestamps of the last data refresh and last VA submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStats {
    #[serde(default)]
    pub last_update: Option<String>,
    #[serde(default)]
    pub last_submission: Option<String>,
}
