//! Client-side timeseries extraction.
//!
//! The backend has no batch endpoint; a timeseries is one pixel lookup per
//! date, issued sequentially with a fixed pacing delay so a progress
//! indicator can repaint between calls.

use std::time::Duration;

use chrono::NaiveDate;

use viewer_common::{expand_date_range, LatLng, RasterCatalog, Variable, ViewerError, ViewerResult};
use viewer_protocol::TimeseriesResult;

use crate::client::ApiClient;

/// Pacing delay between per-date lookups.
const PACING_DELAY: Duration = Duration::from_millis(10);

/// Progress callback: (completed dates, total dates).
pub type TimeseriesProgress<'a> = &'a mut dyn FnMut(usize, usize);

impl ApiClient {
    /// Extract a timeseries at a fixed point over a date range.
    ///
    /// Dates whose lookup fails or returns no data are skipped rather than
    /// aborting the loop; gaps in the archive are expected. An empty result
    /// set is reported as `NoData`.
    pub async fn timeseries(
        &self,
        catalog: &RasterCatalog,
        variable: Variable,
        point: LatLng,
        start: NaiveDate,
        end: NaiveDate,
        progress: TimeseriesProgress<'_>,
    ) -> ViewerResult<TimeseriesResult> {
        let dates = expand_date_range(start, end);
        let total = dates.len();
        if total == 0 {
            return Err(ViewerError::NoData(
                "No valid data available for the selected date range".to_string(),
            ));
        }

        let mut values = Vec::new();
        let mut valid_dates = Vec::new();

        for (i, date) in dates.iter().enumerate() {
            let raster_url = catalog.object_url(*date, variable);
            match self.point_value(&raster_url, point).await {
                Ok(resp) => {
                    if let Some(value) = resp.valid_value() {
                        values.push(value);
                        valid_dates.push(*date);
                    }
                }
                Err(e) => {
                    tracing::debug!(date = %date, error = %e, "Skipping date in timeseries");
                }
            }

            progress(i + 1, total);
            tokio::time::sleep(PACING_DELAY).await;
        }

        if values.is_empty() {
            return Err(ViewerError::NoData(
                "No valid data available for the selected date range".to_string(),
            ));
        }

        let result = TimeseriesResult {
            values,
            dates: valid_dates,
            location: point,
        };
        result.validate()?;
        Ok(result)
    }
}
