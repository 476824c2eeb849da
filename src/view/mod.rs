//! Dashboard View Model
//!
//! State, transitions and derived data for the dashboard page.
//!
//! ## Architecture
//!
//! - **State**: immutable [`DashboardState`] snapshots
//! - **Update**: [`DashboardState::update`] maps a [`Message`] to the next
//!   snapshot and an [`Effect`]
//! - **Model**: [`ViewModel`] projections for charts, map and dropdowns
//! - **Surface**: [`RenderSurface`] collaborators that display a frame
//! - **Controller**: [`Dashboard`] runs fetches and renders in order

mod controller;
mod error;
mod model;
mod state;
mod surface;

pub use controller::Dashboard;
pub use error::{ViewError, ViewResult};
pub use model::{cod_chart_height, locations, Highlights, MapView, ViewModel};
pub use state::{cause_options, DashboardState, Effect, Message, Viewport};
pub use surface::{RenderSurface, TextSurface};
