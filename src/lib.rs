//! # VA Dashboard
//!
//! View-model core for a verbal autopsy analytics dashboard: fetches
//! aggregated statistics, derives chart data, dropdown options and a
//! choropleth map, and re-derives on every filter change.
//!
//! ## Modules
//!
//! - [`scale`]: Breakpoint computation and color bucketing
//! - [`filters`]: Death-date range resolution and query parameters
//! - [`api`]: Typed client for the dashboard endpoint
//! - [`geo`]: GeoJSON boundaries and choropleth styling
//! - [`view`]: Immutable state, transitions and rendering surfaces
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use va_dashboard::api::{ClientConfig, DashboardClient};
//! use va_dashboard::geo::Boundaries;
//! use va_dashboard::view::{Dashboard, Message, TextSurface};
//! use va_dashboard::filters::DateRangeSelection;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DashboardClient::new(ClientConfig::default())?;
//!     let boundaries = Boundaries::load(Path::new("zambia_geojson.json"))?;
//!
//!     let mut dashboard = Dashboard::new(client, TextSurface::new(std::io::stdout()));
//!     dashboard.start(Some(boundaries)).await?;
//!
//!     // Narrow to the last three months
//!     dashboard
//!         .dispatch(Message::SetDateSelection(DateRangeSelection::WithinThreeMonths))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod filters;
pub mod geo;
pub mod scale;
pub mod view;

// Re-export top-level types for convenience
pub use scale::{
    color_for, compute_breakpoints, BoundaryMode, Breakpoints, ColorScale, Fill, ScaleError,
    NO_DATA_COLOR,
};

pub use filters::{DashboardQuery, DateRange, DateRangeResolver, DateRangeSelection, FilterError};

pub use api::{
    ClientConfig, ClientError, DashboardClient, DashboardPayload, DashboardSource, RegionCount,
};

pub use geo::{Boundaries, BorderType, Choropleth, GeoError};

pub use view::{Dashboard, DashboardState, Message, RenderSurface, ViewError, ViewModel};

pub use config::{Config, ConfigError, LoggingConfig};
