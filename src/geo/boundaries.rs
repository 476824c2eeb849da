//! GeoJSON boundaries and border granularity

use super::error::{GeoError, GeoResult};
use crate::api::{DashboardPayload, RegionCount};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Level label carried by the national outline feature
pub const COUNTRY_LABEL: &str = "Country";

/// Administrative level the choropleth is drawn at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BorderType {
    #[default]
    Province,
    District,
}

impl BorderType {
    /// All border types in dropdown order
    pub fn all() -> &'static [BorderType] {
        &[BorderType::Province, BorderType::District]
    }

    /// Value of `area_level_label` for features at this level
    pub fn label(&self) -> &'static str {
        match self {
            BorderType::Province => "Province",
            BorderType::District => "District",
        }
    }

    /// Region counts for this level, if the payload carries them
    pub fn sums<'a>(&self, payload: &'a DashboardPayload) -> Option<&'a [RegionCount]> {
        match self {
            BorderType::Province => payload.geographic_province_sums.as_deref(),
            BorderType::District => payload.geographic_district_sums.as_deref(),
        }
    }
}

impl fmt::Display for BorderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BorderType {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "province" => Ok(BorderType::Province),
            "district" => Ok(BorderType::District),
            _ => Err(GeoError::UnknownBorder(s.to_string())),
        }
    }
}

/// Properties the dashboard reads from each feature
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    #[serde(default)]
    pub area_name: String,
    #[serde(default)]
    pub area_level_label: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A single GeoJSON feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default = "default_feature_type")]
    pub kind: String,
    #[serde(default)]
    pub properties: FeatureProperties,
    #[serde(default)]
    pub geometry: serde_json::Value,
}

fn default_feature_type() -> String {
    "Feature".to_string()
}

impl Feature {
    /// Feature with no geometry, mostly useful in tests
    pub fn named(area_name: impl Into<String>, area_level_label: impl Into<String>) -> Self {
        Self {
            kind: default_feature_type(),
            properties: FeatureProperties {
                area_name: area_name.into(),
                area_level_label: area_level_label.into(),
                extra: serde_json::Map::new(),
            },
            geometry: serde_json::Value::Null,
        }
    }

    /// Name used to look the feature up in the region counts,
    /// e.g. "Lusaka Province"
    pub fn region_key(&self) -> String {
        format!(
            "{} {}",
            self.properties.area_name, self.properties.area_level_label
        )
    }

    pub fn is_country(&self) -> bool {
        self.properties.area_level_label == COUNTRY_LABEL
    }
}

/// GeoJSON FeatureCollection of administrative boundaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boundaries {
    #[serde(rename = "type", default = "default_collection_type")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

fn default_collection_type() -> String {
    "FeatureCollection".to_string()
}

impl Boundaries {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: default_collection_type(),
            features,
        }
    }

    /// Load a GeoJSON file from disk
    pub fn load(path: &Path) -> GeoResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GeoError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let boundaries: Boundaries =
            serde_json::from_str(&content).map_err(|e| GeoError::Parse {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?;

        tracing::debug!(
            path = %path.display(),
            features = boundaries.features.len(),
            "Loaded boundaries"
        );

        Ok(boundaries)
    }

    /// Features drawn for `border`: the country outline plus that level.
    ///
    /// Returns a filtered copy; `self` is left untouched.
    pub fn visible(&self, border: BorderType) -> Boundaries {
        let features = self
            .features
            .iter()
            .filter(|f| f.is_country() || f.properties.area_level_label == border.label())
            .cloned()
            .collect();

        Boundaries {
            kind: self.kind.clone(),
            features,
        }
    }
}
