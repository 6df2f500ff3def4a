//! Raster object addressing for the daily GeoTIFF archive.

use chrono::NaiveDate;

use crate::variable::Variable;

/// Sentinel value marking missing pixels in the archive rasters.
///
/// Values equal to this (or null) are filtered before plotting rather than
/// treated as errors.
pub const NO_DATA_VALUE: f64 = -9999.0;

/// True when a sampled value is present and plottable.
pub fn is_valid_value(value: f64) -> bool {
    value.is_finite() && value != NO_DATA_VALUE
}

/// Addresses GeoTIFF objects in the cloud archive.
///
/// Object layout: `{base}/{yyyy}/{mm}/{dd}/LIS_{yyyymmdd}_{variable}.tif`.
#[derive(Debug, Clone)]
pub struct RasterCatalog {
    base_url: String,
}

impl RasterCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The object URL for one day of one variable. Pure, no I/O.
    pub fn object_url(&self, date: NaiveDate, variable: Variable) -> String {
        format!(
            "{}/{}/LIS_{}_{}.tif",
            self.base_url,
            date.format("%Y/%m/%d"),
            date.format("%Y%m%d"),
            variable.field()
        )
    }
}

const GCS_HOST: &str = "https://storage.googleapis.com/";

/// Rewrite a plain GCS object URL to the JSON API download form.
///
/// Plain `storage.googleapis.com/{bucket}/{object}` URLs are subject to
/// redirect behavior some readers mishandle; the
/// `download/storage/v1/b/{bucket}/o/{object}?alt=media` form is not. URLs
/// already in that form, or pointing elsewhere, pass through untouched.
pub fn gcs_download_url(url: &str) -> String {
    if !url.starts_with(GCS_HOST) || url.contains("/o/") {
        return url.to_string();
    }
    let bucket_object = &url[GCS_HOST.len()..];
    let (bucket, object_path) = match bucket_object.split_once('/') {
        Some(parts) => parts,
        None => return url.to_string(),
    };
    let encoded = percent_encode_path(object_path);
    format!(
        "{}download/storage/v1/b/{}/o/{}?alt=media",
        GCS_HOST, bucket, encoded
    )
}

/// Percent-encode an object path, including its slashes.
fn percent_encode_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for byte in path.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_url() {
        let catalog = RasterCatalog::new("https://storage.googleapis.com/lis-olci-netcdfs");
        let date = NaiveDate::from_ymd_opt(2025, 8, 5).unwrap();
        assert_eq!(
            catalog.object_url(date, Variable::Cdom),
            "https://storage.googleapis.com/lis-olci-netcdfs/2025/08/05/LIS_20250805_cdom.tif"
        );
    }

    #[test]
    fn test_object_url_is_deterministic() {
        let catalog = RasterCatalog::new("https://example.com/rasters/");
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let a = catalog.object_url(date, Variable::Chl);
        let b = catalog.object_url(date, Variable::Chl);
        assert_eq!(a, b);
        assert_eq!(a, "https://example.com/rasters/2024/12/31/LIS_20241231_chl.tif");
    }

    #[test]
    fn test_gcs_download_url_rewrites_plain_urls() {
        let url = "https://storage.googleapis.com/lis-olci-netcdfs/2025/08/05/LIS_20250805_cdom.tif";
        assert_eq!(
            gcs_download_url(url),
            "https://storage.googleapis.com/download/storage/v1/b/lis-olci-netcdfs/o/2025%2F08%2F05%2FLIS_20250805_cdom.tif?alt=media"
        );
    }

    #[test]
    fn test_gcs_download_url_passes_through_other_urls() {
        let already = "https://storage.googleapis.com/download/storage/v1/b/x/o/y?alt=media";
        assert_eq!(gcs_download_url(already), already);
        assert_eq!(gcs_download_url("https://example.com/a.tif"), "https://example.com/a.tif");
    }

    #[test]
    fn test_is_valid_value() {
        assert!(is_valid_value(3.2));
        assert!(is_valid_value(0.0));
        assert!(!is_valid_value(NO_DATA_VALUE));
        assert!(!is_valid_value(f64::NAN));
        assert!(!is_valid_value(f64::INFINITY));
    }
}
