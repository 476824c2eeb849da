//! Dashboard controller
//!
//! Owns the only mutable copy of the state. Messages are applied one at a
//! time and their effects run to completion before the next message; a
//! fetch is never cancelled by a later filter change.

use super::error::ViewResult;
use super::model::ViewModel;
use super::state::{DashboardState, Effect, Message};
use super::surface::RenderSurface;
use crate::api::DashboardSource;
use crate::geo::Boundaries;
use crate::scale::BoundaryMode;
use chrono::{NaiveDate, Utc};

/// Drives a data source and a rendering surface from messages
pub struct Dashboard<S, R> {
    source: S,
    surface: R,
    state: DashboardState,
    mode: BoundaryMode,
    today: Option<NaiveDate>,
}

impl<S, R> Dashboard<S, R>
where
    S: DashboardSource,
    R: RenderSurface,
{
    pub fn new(source: S, surface: R) -> Self {
        Self {
            source,
            surface,
            state: DashboardState::new(),
            mode: BoundaryMode::default(),
            today: None,
        }
    }

    /// Builder method: choose how boundary counts are bucketed
    pub fn boundary_mode(mut self, mode: BoundaryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder method: pin the reference date for relative filters
    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Builder method: start from an existing snapshot
    pub fn with_state(mut self, state: DashboardState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn into_surface(self) -> R {
        self.surface
    }

    /// Current projection of the state
    pub fn view(&self) -> ViewModel {
        ViewModel::from_state(&self.state, self.mode)
    }

    /// Initial load: fetch data, then install boundaries if given
    pub async fn start(&mut self, boundaries: Option<Boundaries>) -> ViewResult<()> {
        tracing::info!("Starting dashboard");
        self.dispatch(Message::Refresh).await?;
        if let Some(boundaries) = boundaries {
            self.dispatch(Message::BoundariesLoaded(boundaries)).await?;
        }
        Ok(())
    }

    /// Apply a message and run every effect it triggers
    pub async fn dispatch(&mut self, message: Message) -> ViewResult<()> {
        let mut next = Some(message);

        while let Some(message) = next.take() {
            let state = std::mem::take(&mut self.state);
            let (state, effect) = state.update(message);
            self.state = state;

            match effect {
                Effect::None => {}
                Effect::Fetch(query) => {
                    let today = self.today.unwrap_or_else(|| Utc::now().date_naive());
                    let payload = self.source.fetch(&query, today).await.map_err(|e| {
                        tracing::error!(error = %e, "Dashboard fetch failed");
                        e
                    })?;
                    next = Some(Message::DataLoaded(payload));
                }
                Effect::Redraw => {
                    tracing::debug!(border = %self.state.border, "Redrawing dashboard");
                    let view = self.view();
                    self.surface.render(&view)?;
                }
                Effect::Resize(viewport) => {
                    self.surface.resize(viewport)?;
                    let view = self.view();
                    self.surface.render(&view)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CauseCount, ClientError, ClientResult, DashboardPayload, RegionCount};
    use crate::filters::{DashboardQuery, DateRangeSelection};
    use crate::geo::{BorderType, Feature};
    use crate::view::error::ViewError;
    use crate::view::state::Viewport;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubSource {
        requests: Mutex<Vec<Vec<(&'static str, String)>>>,
        fail: bool,
    }

    #[async_trait]
    impl DashboardSource for StubSource {
        async fn fetch(
            &self,
            query: &DashboardQuery,
            today: NaiveDate,
        ) -> ClientResult<DashboardPayload> {
            self.requests.lock().unwrap().push(query.to_params(today));
            if self.fail {
                return Err(ClientError::Unavailable);
            }

            let cod_grouping = if query.cause.is_empty() {
                vec![
                    CauseCount {
                        cause: "Renal failure".into(),
                        count: 40,
                    },
                    CauseCount {
                        cause: "Diabetes mellitus".into(),
                        count: 60,
                    },
                ]
            } else {
                vec![CauseCount {
                    cause: query.cause.clone(),
                    count: 40,
                }]
            };

            Ok(DashboardPayload {
                cod_grouping,
                geographic_province_sums: Some(vec![RegionCount::new("Lusaka Province", 100)]),
                geographic_district_sums: Some(vec![RegionCount::new("Kafue District", 50)]),
                uncoded_vas: 3,
                ..Default::default()
            })
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        frames: Vec<ViewModel>,
        resizes: Vec<Viewport>,
    }

    impl RenderSurface for RecordingSurface {
        fn render(&mut self, view: &ViewModel) -> ViewResult<()> {
            self.frames.push(view.clone());
            Ok(())
        }

        fn resize(&mut self, viewport: Viewport) -> ViewResult<()> {
            self.resizes.push(viewport);
            Ok(())
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn boundaries() -> Boundaries {
        Boundaries::new(vec![
            Feature::named("Zambia", "Country"),
            Feature::named("Lusaka", "Province"),
            Feature::named("Kafue", "District"),
        ])
    }

    #[tokio::test]
    async fn test_start_fetches_and_renders() {
        let mut dashboard = Dashboard::new(StubSource::default(), RecordingSurface::default())
            .today(today());

        dashboard.start(Some(boundaries())).await.unwrap();

        let frames = &dashboard.surface().frames;
        assert_eq!(frames.len(), 2);
        assert!(frames[0].map.is_none());
        assert_eq!(frames[1].highlights.coded_vas, 100);
        assert_eq!(
            frames[1].cause_options,
            vec!["Diabetes mellitus", "Renal failure"]
        );

        let map = frames[1].map.as_ref().unwrap();
        assert_eq!(map.features[1].region, "Lusaka Province");
        assert_eq!(map.features[1].count, Some(100));
    }

    #[tokio::test]
    async fn test_filter_change_refetches() {
        let mut dashboard = Dashboard::new(StubSource::default(), RecordingSurface::default())
            .today(today());
        dashboard.start(None).await.unwrap();

        dashboard
            .dispatch(Message::SetDateSelection(DateRangeSelection::WithinOneMonth))
            .await
            .unwrap();
        dashboard
            .dispatch(Message::SetCause("Renal failure".into()))
            .await
            .unwrap();

        let requests = dashboard.source.requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1][0], ("start_date", "2024-02-15".to_string()));
        assert_eq!(requests[2][2], ("cause_of_death", "Renal failure".to_string()));

        // cause list still reflects the unfiltered load
        assert_eq!(dashboard.state().cause_options.len(), 2);
        assert_eq!(dashboard.view().highlights.coded_vas, 40);
    }

    #[tokio::test]
    async fn test_border_change_redraws_only() {
        let mut dashboard = Dashboard::new(StubSource::default(), RecordingSurface::default())
            .today(today());
        dashboard.start(Some(boundaries())).await.unwrap();

        dashboard
            .dispatch(Message::SetBorder(BorderType::District))
            .await
            .unwrap();

        assert_eq!(dashboard.source.requests.lock().unwrap().len(), 1);
        let surface = dashboard.into_surface();
        let map = surface.frames.last().unwrap().map.as_ref().unwrap();
        assert_eq!(map.border, BorderType::District);
        assert_eq!(map.features[1].region, "Kafue District");
    }

    #[tokio::test]
    async fn test_resize_rerenders() {
        let mut dashboard = Dashboard::new(StubSource::default(), RecordingSurface::default())
            .today(today());
        dashboard.start(None).await.unwrap();

        dashboard
            .dispatch(Message::Resize(Viewport::new(300, 200)))
            .await
            .unwrap();

        let surface = dashboard.into_surface();
        assert_eq!(surface.resizes, vec![Viewport::new(300, 200)]);
        assert_eq!(surface.frames.last().unwrap().cod_chart_height, 160);
    }

    #[tokio::test]
    async fn test_fetch_failure_surfaces() {
        let source = StubSource {
            fail: true,
            ..Default::default()
        };
        let mut dashboard = Dashboard::new(source, RecordingSurface::default()).today(today());

        let err = dashboard.start(None).await.unwrap_err();
        assert!(matches!(err, ViewError::Client(ClientError::Unavailable)));
        assert!(dashboard.surface().frames.is_empty());
    }
}
