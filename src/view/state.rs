//! Dashboard state and transitions
//!
//! [`DashboardState`] is an immutable snapshot. [`DashboardState::update`]
//! consumes it with a [`Message`] and returns the next snapshot together
//! with the [`Effect`] the controller must perform.

use crate::api::DashboardPayload;
use crate::filters::{DashboardQuery, DateRangeSelection};
use crate::geo::{Boundaries, BorderType};
use std::sync::Arc;

/// Size of the chart area, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// User or system events the dashboard reacts to
#[derive(Debug, Clone)]
pub enum Message {
    /// Re-fetch with the current filters
    Refresh,
    SetDateSelection(DateRangeSelection),
    SetCustomStart(String),
    SetCustomEnd(String),
    SetCause(String),
    SetBorder(BorderType),
    DataLoaded(DashboardPayload),
    BoundariesLoaded(Boundaries),
    Resize(Viewport),
    /// Restore default filters and re-fetch
    Reset,
}

/// Work requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Fetch(DashboardQuery),
    Redraw,
    Resize(Viewport),
}

/// Everything the dashboard knows at one point in time
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub query: DashboardQuery,
    pub border: BorderType,
    pub payload: Option<Arc<DashboardPayload>>,
    pub boundaries: Option<Arc<Boundaries>>,
    /// Cause dropdown options, captured from the first unfiltered load
    pub cause_options: Vec<String>,
    pub viewport: Viewport,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a message, returning the next state and the effect to run
    pub fn update(self, message: Message) -> (Self, Effect) {
        match message {
            Message::Refresh => {
                let effect = Effect::Fetch(self.query.clone());
                (self, effect)
            }
            Message::SetDateSelection(selection) => {
                let query = self.query.clone().date_selection(selection);
                self.with_query(query)
            }
            Message::SetCustomStart(start) => {
                let query = DashboardQuery {
                    custom_start: start,
                    ..self.query.clone()
                };
                self.with_query(query)
            }
            Message::SetCustomEnd(end) => {
                let query = DashboardQuery {
                    custom_end: end,
                    ..self.query.clone()
                };
                self.with_query(query)
            }
            Message::SetCause(cause) => {
                let query = self.query.clone().cause(cause);
                self.with_query(query)
            }
            Message::SetBorder(border) => {
                if border == self.border {
                    return (self, Effect::None);
                }
                (Self { border, ..self }, Effect::Redraw)
            }
            Message::DataLoaded(payload) => {
                let cause_options = if self.cause_options.is_empty() {
                    cause_options(&payload)
                } else {
                    self.cause_options
                };
                let next = Self {
                    payload: Some(Arc::new(payload)),
                    cause_options,
                    ..self
                };
                (next, Effect::Redraw)
            }
            Message::BoundariesLoaded(boundaries) => {
                let next = Self {
                    boundaries: Some(Arc::new(boundaries)),
                    ..self
                };
                (next, Effect::Redraw)
            }
            Message::Resize(viewport) => (Self { viewport, ..self }, Effect::Resize(viewport)),
            Message::Reset => self.with_query(DashboardQuery::reset()),
        }
    }

    fn with_query(self, query: DashboardQuery) -> (Self, Effect) {
        let effect = Effect::Fetch(query.clone());
        (Self { query, ..self }, effect)
    }
}

/// Sorted cause names for the cause-of-death dropdown
pub fn cause_options(payload: &DashboardPayload) -> Vec<String> {
    let mut causes: Vec<String> = payload
        .cod_grouping
        .iter()
        .map(|c| c.cause.clone())
        .collect();
    causes.sort();
    causes
}
