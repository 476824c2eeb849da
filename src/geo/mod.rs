//! Geographic Boundaries
//!
//! GeoJSON boundary model and choropleth styling.
//!
//! Features carry an `area_level_label` ("Country", "Province",
//! "District"). Only the country outline and the selected level are drawn;
//! each region is looked up in the counts by `"{area_name} {area_level_label}"`.

mod boundaries;
mod choropleth;
mod error;

pub use boundaries::{Boundaries, BorderType, Feature, FeatureProperties, COUNTRY_LABEL};
pub use choropleth::{Choropleth, FeatureStyle, StyledFeature, OUTLINE_COLOR};
pub use error::{GeoError, GeoResult};
