//! Executes tool requests against the backend.
//!
//! The tool controller decides what to request; the session issues it and
//! turns the response into a displayable outcome. Every execution opens a new
//! request generation, so a response that was overtaken by a later
//! interaction comes back as [`Outcome::Stale`] instead of data.

use chrono::NaiveDate;

use viewer_client::{ApiClient, RequestSeq, TimeseriesProgress};
use viewer_common::{LatLng, Polygon, ViewerError, ViewerResult};
use viewer_protocol::{PolygonStatsResponse, TimeseriesResult, TransectResponse};

use crate::config::ViewerConfig;
use crate::state::ViewerState;
use crate::tools::ToolRequest;

/// The displayable result of one tool request.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Value at a clicked point; `None` when the pixel held no data.
    PointValue { point: LatLng, value: Option<f64> },
    Transect {
        start: LatLng,
        end: LatLng,
        profile: TransectResponse,
    },
    Timeseries(TimeseriesResult),
    /// Plottable in-situ observations for the current date and variable.
    Overlay(Vec<(LatLng, f64)>),
    PolygonStats {
        polygon: Polygon,
        stats: PolygonStatsResponse,
    },
    /// A later interaction superseded this request; discard silently.
    Stale,
}

/// A connected viewer session.
#[derive(Debug)]
pub struct Session {
    client: ApiClient,
    seq: RequestSeq,
}

impl Session {
    pub fn new(config: &ViewerConfig) -> ViewerResult<Self> {
        let client = ApiClient::new(
            config.api_base.clone(),
            std::time::Duration::from_secs(config.timeout_secs),
        )?;
        Ok(Self {
            client,
            seq: RequestSeq::new(),
        })
    }

    /// Execute one tool request under the current viewer state.
    ///
    /// `timeseries_range` is required for timeseries requests and ignored
    /// otherwise. `progress` is invoked per completed date during a
    /// timeseries extraction.
    pub async fn execute(
        &self,
        state: &ViewerState,
        request: ToolRequest,
        timeseries_range: Option<(NaiveDate, NaiveDate)>,
        progress: Option<TimeseriesProgress<'_>>,
    ) -> ViewerResult<Outcome> {
        let generation = self.seq.begin();
        let raster_url = state.raster_url();

        let outcome = match request {
            ToolRequest::PointValue { point } => {
                let resp = self.client.point_value(&raster_url, point).await?;
                Outcome::PointValue {
                    point,
                    value: resp.valid_value(),
                }
            }
            ToolRequest::Transect { start, end } => {
                let profile = self.client.transect(&raster_url, start, end).await?;
                Outcome::Transect {
                    start,
                    end,
                    profile,
                }
            }
            ToolRequest::Timeseries { point } => {
                let (range_start, range_end) = timeseries_range.ok_or_else(|| {
                    ViewerError::Domain("Timeseries requires a date range".to_string())
                })?;
                let mut noop = |_done: usize, _total: usize| {};
                let progress: TimeseriesProgress<'_> = match progress {
                    Some(p) => p,
                    None => &mut noop,
                };
                let result = self
                    .client
                    .timeseries(
                        state.catalog(),
                        state.variable(),
                        point,
                        range_start,
                        range_end,
                        progress,
                    )
                    .await?;
                Outcome::Timeseries(result)
            }
            ToolRequest::OverlayFetch => {
                let resp = self
                    .client
                    .overlay_points(state.variable(), state.date())
                    .await?;
                Outcome::Overlay(resp.plottable_points())
            }
            ToolRequest::PolygonStats { polygon } => {
                let stats = self.client.polygon_stats(&raster_url, &polygon).await?;
                Outcome::PolygonStats { polygon, stats }
            }
        };

        if !self.seq.is_current(generation) {
            tracing::debug!("Discarding response from a superseded request");
            return Ok(Outcome::Stale);
        }
        Ok(outcome)
    }

    /// List dates with in-situ observations for the current variable.
    pub async fn available_dates(&self, state: &ViewerState) -> ViewerResult<Vec<NaiveDate>> {
        let resp = self.client.available_dates(state.variable()).await?;
        Ok(resp.parsed_dates())
    }
}
