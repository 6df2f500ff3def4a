//! CSV export of query results.

use chrono::NaiveDate;

use viewer_common::{LatLng, Polygon, Variable};
use viewer_protocol::{PolygonStatsResponse, TimeseriesResult, TransectResponse};

/// A CSV document ready to be written out.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

/// Transect profile as CSV.
///
/// The backend reports values and along-line distances; coordinates per row
/// are interpolated between the clicked endpoints by distance fraction.
/// Sentinel samples are filtered, as on the chart.
pub fn transect_csv(
    transect: &TransectResponse,
    start: LatLng,
    end: LatLng,
    variable: Variable,
) -> CsvExport {
    let mut content = String::from("Distance (km),Value,Latitude,Longitude\n");
    // Fractions use the full profile length so coordinates stay geometric
    // even when trailing samples are filtered out.
    let total = transect.distances.last().copied().unwrap_or(0.0);

    for (distance, value) in transect.valid_samples() {
        let fraction = if total > 0.0 { distance / total } else { 0.0 };
        let point = start.lerp(end, fraction);
        content.push_str(&format!(
            "{},{},{},{}\n",
            distance, value, point.lat, point.lon
        ));
    }

    CsvExport {
        filename: format!("transect_{}_data.csv", variable.field()),
        content,
    }
}

/// Timeseries as CSV; every row carries the fixed extraction point.
pub fn timeseries_csv(timeseries: &TimeseriesResult, variable: Variable) -> CsvExport {
    let mut content = String::from("Date,Value,Latitude,Longitude\n");
    for (date, value) in timeseries.dates.iter().zip(timeseries.values.iter()) {
        content.push_str(&format!(
            "{},{},{},{}\n",
            date.format("%Y-%m-%d"),
            value,
            timeseries.location.lat,
            timeseries.location.lon
        ));
    }

    CsvExport {
        filename: format!("timeseries_{}_data.csv", variable.field()),
        content,
    }
}

/// Polygon statistics as CSV: a header block, the five statistics, then the
/// polygon vertices.
pub fn polygon_stats_csv(
    stats: &PolygonStatsResponse,
    polygon: &Polygon,
    variable: Variable,
    date: NaiveDate,
) -> CsvExport {
    let settings = variable.settings();
    let mut content = format!(
        "Polygon Statistics - {} ({})\n",
        settings.label, settings.units
    );
    content.push_str(&format!("Date: {}\n\n", date.format("%Y-%m-%d")));
    content.push_str("Statistic,Value\n");
    content.push_str(&format!("Mean,{}\n", fmt_stat(stats.mean)));
    content.push_str(&format!("Min,{}\n", fmt_stat(stats.min)));
    content.push_str(&format!("Max,{}\n", fmt_stat(stats.max)));
    content.push_str(&format!("Standard Deviation,{}\n", fmt_stat(stats.std)));
    content.push_str(&format!("Valid Pixels,{}\n", stats.count));

    content.push_str("\nPolygon Coordinates (Lat,Lng)\n");
    for vertex in polygon.vertices() {
        content.push_str(&format!("{},{}\n", vertex.lat, vertex.lon));
    }

    CsvExport {
        filename: format!(
            "polygon_stats_{}_{}.csv",
            variable.field(),
            date.format("%Y%m%d")
        ),
        content,
    }
}

fn fmt_stat(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "n/a".to_string(),
    }
}
