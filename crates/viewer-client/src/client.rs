//! HTTP operations against the backend endpoints.

use std::time::Duration;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use viewer_common::{LatLng, Polygon, Variable, ViewerError, ViewerResult};
use viewer_protocol::{
    AvailableDatesResponse, ErrorBody, InSituResponse, PointValueResponse, PolygonStatsResponse,
    TransectResponse,
};

/// Client for the raster-analysis backend REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    api_base: String,
}

impl ApiClient {
    /// Create a client against the given API base URL.
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> ViewerResult<Self> {
        let mut api_base = api_base.into();
        while api_base.ends_with('/') {
            api_base.pop();
        }
        if api_base.is_empty() {
            return Err(ViewerError::Config("API base URL is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ViewerError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, api_base })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }

    /// Sample the raster at one point.
    pub async fn point_value(
        &self,
        raster_url: &str,
        point: LatLng,
    ) -> ViewerResult<PointValueResponse> {
        let url = self.endpoint("get_value");
        self.get_json(
            &url,
            &[
                ("url", raster_url.to_string()),
                ("lat", point.lat.to_string()),
                ("lon", point.lon.to_string()),
            ],
        )
        .await
    }

    /// Sample the raster along the line between two points.
    pub async fn transect(
        &self,
        raster_url: &str,
        start: LatLng,
        end: LatLng,
    ) -> ViewerResult<TransectResponse> {
        let url = self.endpoint("get_transect");
        let resp: TransectResponse = self
            .get_json(
                &url,
                &[
                    ("url", raster_url.to_string()),
                    ("start_lat", start.lat.to_string()),
                    ("start_lon", start.lon.to_string()),
                    ("end_lat", end.lat.to_string()),
                    ("end_lon", end.lon.to_string()),
                ],
            )
            .await?;
        resp.validate()?;
        Ok(resp)
    }

    /// Fetch in-situ observation points for a variable and date.
    pub async fn overlay_points(
        &self,
        variable: Variable,
        date: NaiveDate,
    ) -> ViewerResult<InSituResponse> {
        let url = self.endpoint("get_insitu_data");
        self.get_json(
            &url,
            &[
                ("variable", variable.field().to_string()),
                ("date", date.format("%Y-%m-%d").to_string()),
            ],
        )
        .await
    }

    /// List dates with in-situ observations for a variable.
    pub async fn available_dates(
        &self,
        variable: Variable,
    ) -> ViewerResult<AvailableDatesResponse> {
        let url = self.endpoint("get_available_dates");
        self.get_json(&url, &[("variable", variable.field().to_string())])
            .await
    }

    /// Compute summary statistics for raster pixels inside a polygon.
    ///
    /// A 404 from the backend signals "no data in this area" and maps to
    /// `ViewerError::NoData`, distinct from generic failures. An all-null
    /// stats payload gets the same treatment.
    pub async fn polygon_stats(
        &self,
        raster_url: &str,
        polygon: &Polygon,
    ) -> ViewerResult<PolygonStatsResponse> {
        let url = self.endpoint("get_polygon_stats");
        let body = serde_json::json!({
            "url": raster_url,
            "polygon": polygon.to_geojson(),
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ViewerError::Network(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(ViewerError::NoData(
                "No valid data available for this date/area".to_string(),
            ));
        }
        if !status.is_success() {
            let message = Self::error_message(response).await;
            return Err(ViewerError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let stats: PolygonStatsResponse = response
            .json()
            .await
            .map_err(|e| ViewerError::InvalidResponse(e.to_string()))?;

        if stats.is_empty() {
            return Err(ViewerError::NoData(
                "No valid data points found in this area".to_string(),
            ));
        }
        Ok(stats)
    }

    /// GET a JSON payload, converting every failure to a typed error.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> ViewerResult<T> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(url, error = %e, "Request failed");
                ViewerError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = Self::error_message(response).await;
            tracing::debug!(url, status = status.as_u16(), message, "Backend error");
            return Err(ViewerError::Http {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ViewerError::InvalidResponse(e.to_string()))
    }

    /// Extract the backend's error message from a non-2xx response body.
    async fn error_message(response: reqwest::Response) -> String {
        let fallback = response
            .status()
            .canonical_reason()
            .unwrap_or("error")
            .to_string();
        match response.json::<ErrorBody>().await {
            Ok(body) => body.message().map(str::to_string).unwrap_or(fallback),
            Err(_) => fallback,
        }
    }
}
