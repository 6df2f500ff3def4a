//! Backend response payloads and boundary validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use viewer_common::raster::is_valid_value;
use viewer_common::{LatLng, ViewerError, ViewerResult};

/// Error payload returned by the backend with non-2xx responses.
///
/// The backend is inconsistent about the field name, so both are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// The backend's message, whichever field carried it.
    pub fn message(&self) -> Option<&str> {
        self.detail.as_deref().or(self.error.as_deref())
    }
}

/// Response to a single pixel lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointValueResponse {
    /// Sampled value; null when the pixel holds no data.
    pub value: Option<f64>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

impl PointValueResponse {
    /// The sampled value with sentinel/no-data filtering applied.
    pub fn valid_value(&self) -> Option<f64> {
        self.value.filter(|v| is_valid_value(*v))
    }
}

/// Response to a transect profile query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransectResponse {
    pub values: Vec<f64>,
    pub distances: Vec<f64>,
    #[serde(default)]
    pub start_point: Option<LatLng>,
    #[serde(default)]
    pub end_point: Option<LatLng>,
}

impl TransectResponse {
    /// Check structural invariants: parallel arrays, non-decreasing distances.
    pub fn validate(&self) -> ViewerResult<()> {
        if self.values.len() != self.distances.len() {
            return Err(ViewerError::InvalidResponse(format!(
                "Transect arrays differ in length: {} values vs {} distances",
                self.values.len(),
                self.distances.len()
            )));
        }
        if self.distances.windows(2).any(|w| w[1] < w[0]) {
            return Err(ViewerError::InvalidResponse(
                "Transect distances are not non-decreasing".to_string(),
            ));
        }
        Ok(())
    }

    /// (distance, value) pairs with sentinel samples dropped.
    pub fn valid_samples(&self) -> Vec<(f64, f64)> {
        self.distances
            .iter()
            .zip(self.values.iter())
            .filter(|(_, v)| is_valid_value(**v))
            .map(|(d, v)| (*d, *v))
            .collect()
    }
}

/// A timeseries assembled client-side from looped single-point calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeseriesResult {
    pub values: Vec<f64>,
    pub dates: Vec<NaiveDate>,
    pub location: LatLng,
}

impl TimeseriesResult {
    pub fn validate(&self) -> ViewerResult<()> {
        if self.values.len() != self.dates.len() {
            return Err(ViewerError::InvalidResponse(format!(
                "Timeseries arrays differ in length: {} values vs {} dates",
                self.values.len(),
                self.dates.len()
            )));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One in-situ observation point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InSituPoint {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
}

impl InSituPoint {
    /// Position and value, when all parts are present and plottable.
    pub fn plottable(&self) -> Option<(LatLng, f64)> {
        let lat = self.lat?;
        let lon = self.lon?;
        let value = self.value.filter(|v| is_valid_value(*v))?;
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }
        Some((LatLng::new(lat, lon), value))
    }
}

/// Response to an in-situ overlay query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InSituResponse {
    pub data: Vec<InSituPoint>,
}

impl InSituResponse {
    /// Plottable points; malformed entries are dropped with a warning, not
    /// treated as errors.
    pub fn plottable_points(&self) -> Vec<(LatLng, f64)> {
        let mut points = Vec::with_capacity(self.data.len());
        for p in &self.data {
            match p.plottable() {
                Some(pv) => points.push(pv),
                None => tracing::warn!(?p, "Dropping invalid in-situ point"),
            }
        }
        points
    }
}

/// Response listing dates with in-situ observations for a variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableDatesResponse {
    pub dates: Vec<String>,
}

impl AvailableDatesResponse {
    /// Parse the date strings, dropping anything not in YYYY-MM-DD form.
    pub fn parsed_dates(&self) -> Vec<NaiveDate> {
        let mut out = Vec::with_capacity(self.dates.len());
        for s in &self.dates {
            match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                Ok(d) => out.push(d),
                Err(_) => tracing::warn!(date = %s, "Dropping unparsable available date"),
            }
        }
        out
    }
}

/// Summary statistics for raster pixels inside a polygon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolygonStatsResponse {
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub std: Option<f64>,
    pub count: u64,
}

impl PolygonStatsResponse {
    /// True when the area contained no valid pixels.
    pub fn is_empty(&self) -> bool {
        self.count == 0 || self.mean.is_none()
    }

    /// The four statistics, present only when the area held data.
    pub fn stats(&self) -> Option<(f64, f64, f64, f64)> {
        Some((self.mean?, self.min?, self.max?, self.std?))
    }
}
