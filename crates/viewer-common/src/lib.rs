//! Common types and utilities shared across all lis-viewer crates.

pub mod colormap;
pub mod error;
pub mod geometry;
pub mod raster;
pub mod time;
pub mod variable;

pub use colormap::{colorbar_ticks, ColorRamp, Colormap, Rgb};
pub use error::{ViewerError, ViewerResult};
pub use geometry::{LatLng, LatLngBounds, Polygon};
pub use raster::{gcs_download_url, is_valid_value, RasterCatalog, NO_DATA_VALUE};
pub use time::{display_date, expand_date_range, next_month, prev_month};
pub use variable::{Variable, VariableSettings};
