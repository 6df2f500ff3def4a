//! Chart and overlay rendering for backend query results.
//!
//! Consumes arrays of (label, value) pairs and draws either a line chart or
//! an overlay of colored points. Values are plotted as received; nothing is
//! aggregated or smoothed locally, and sparse inputs leave gaps unfilled.

pub mod colorbar;
pub mod line;
pub mod markers;
pub mod series;

pub use colorbar::render_colorbar;
pub use line::{ChartKind, LineChart};
pub use markers::MarkerCanvas;
pub use series::{DataPoint, Series};

use image::RgbaImage;
use std::io::Cursor;

use viewer_common::{ViewerError, ViewerResult};

/// Encode an image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> ViewerResult<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, image::ImageOutputFormat::Png)
        .map_err(|e| ViewerError::Io(format!("PNG encoding failed: {}", e)))?;
    Ok(bytes.into_inner())
}
