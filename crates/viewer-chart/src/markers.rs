//! In-situ overlay markers.
//!
//! Markers are filled circles colored through the active color ramp with a
//! white ring, projected into a pixel viewport by simple equirectangular
//! mapping over the region bounds.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut};

use viewer_common::{ColorRamp, LatLng, LatLngBounds, Rgb, ViewerResult};

const RING: Rgba<u8> = Rgba([255, 255, 255, 255]);
const MARKER_RADIUS: i32 = 8;

fn to_pixel(color: Rgb) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, 255])
}

/// A pixel viewport over a geographic bounding box.
#[derive(Debug, Clone)]
pub struct MarkerCanvas {
    image: RgbaImage,
    bounds: LatLngBounds,
}

impl MarkerCanvas {
    /// Create a transparent canvas covering `bounds`.
    pub fn new(width: u32, height: u32, bounds: LatLngBounds) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0])),
            bounds,
        }
    }

    /// Project a geographic point to pixel coordinates.
    ///
    /// North is up: latitude increases toward row zero.
    pub fn project(&self, point: LatLng) -> (i32, i32) {
        let tx = (point.lon - self.bounds.south_west.lon) / self.bounds.width();
        let ty = (self.bounds.north_east.lat - point.lat) / self.bounds.height();
        let x = tx * self.image.width() as f64;
        let y = ty * self.image.height() as f64;
        (x as i32, y as i32)
    }

    /// Draw one marker colored by `value` through the ramp.
    ///
    /// Points outside the bounds are skipped; returns whether it was drawn.
    pub fn draw_marker(
        &mut self,
        point: LatLng,
        value: f64,
        ramp: &ColorRamp,
        max: f64,
    ) -> ViewerResult<bool> {
        if !self.bounds.contains(point) {
            tracing::debug!(lat = point.lat, lon = point.lon, "Marker outside bounds, skipped");
            return Ok(false);
        }
        let color = ramp.color_for(value, max)?;
        let center = self.project(point);
        draw_filled_circle_mut(&mut self.image, center, MARKER_RADIUS, to_pixel(color));
        draw_hollow_circle_mut(&mut self.image, center, MARKER_RADIUS, RING);
        Ok(true)
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewer_common::Colormap;

    fn canvas() -> MarkerCanvas {
        MarkerCanvas::new(600, 400, LatLngBounds::long_island_sound())
    }

    #[test]
    fn test_project_corners() {
        let c = canvas();
        let sw = c.project(LatLng::new(39.0, -76.0));
        assert_eq!(sw, (0, 400));
        let ne = c.project(LatLng::new(43.0, -70.0));
        assert_eq!(ne, (600, 0));
    }

    #[test]
    fn test_marker_center_colored_by_ramp() {
        let mut c = canvas();
        let ramp = Colormap::Turbo.ramp();
        let point = LatLng::new(41.0, -73.0);
        let drawn = c.draw_marker(point, 20.0, &ramp, 20.0).unwrap();
        assert!(drawn);

        let (x, y) = c.project(point);
        let expected = to_pixel(ramp.color_for(20.0, 20.0).unwrap());
        assert_eq!(*c.image().get_pixel(x as u32, y as u32), expected);
    }

    #[test]
    fn test_marker_outside_bounds_skipped() {
        let mut c = canvas();
        let ramp = Colormap::Viridis.ramp();
        let drawn = c
            .draw_marker(LatLng::new(50.0, -73.0), 1.0, &ramp, 12.0)
            .unwrap();
        assert!(!drawn);
        assert!(c.image().pixels().all(|p| p.0[3] == 0));
    }
}
