//! Horizontal colorbar strip for the active ramp.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_line_segment_mut;

use viewer_common::{colorbar_ticks, ColorRamp, ViewerError, ViewerResult};

const TICK: Rgba<u8> = Rgba([40, 40, 40, 255]);
const TICK_HEIGHT: u32 = 6;

/// Render the ramp as a horizontal gradient strip with tick marks at the
/// minimum, midpoint, and maximum.
pub fn render_colorbar(
    ramp: &ColorRamp,
    max: f64,
    width: u32,
    height: u32,
) -> ViewerResult<RgbaImage> {
    if width < 2 {
        return Err(ViewerError::Domain(
            "Colorbar needs at least 2 columns".to_string(),
        ));
    }
    let mut image = RgbaImage::new(width, height);
    let strip_height = height.saturating_sub(TICK_HEIGHT);

    // One gradient stop per column.
    let stops = ramp.gradient_stops(max, (width - 1) as usize)?;
    for (x, (_, color)) in stops.iter().enumerate() {
        let pixel = Rgba([color.r, color.g, color.b, 255]);
        for y in 0..strip_height {
            image.put_pixel(x as u32, y, pixel);
        }
    }

    for tick in colorbar_ticks(max) {
        let t = (tick / max).clamp(0.0, 1.0) as f32;
        let x = t * (width - 1) as f32;
        draw_line_segment_mut(
            &mut image,
            (x, strip_height as f32),
            (x, height as f32 - 1.0),
            TICK,
        );
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewer_common::Colormap;

    #[test]
    fn test_colorbar_spans_ramp_endpoints() {
        let ramp = Colormap::Viridis.ramp();
        let bar = render_colorbar(&ramp, 12.0, 256, 24).unwrap();

        let low = ramp.color_for(0.0, 12.0).unwrap();
        let high = ramp.color_for(12.0, 12.0).unwrap();
        assert_eq!(*bar.get_pixel(0, 0), Rgba([low.r, low.g, low.b, 255]));
        assert_eq!(*bar.get_pixel(255, 0), Rgba([high.r, high.g, high.b, 255]));
    }

    #[test]
    fn test_colorbar_rejects_bad_max() {
        let ramp = Colormap::Magma.ramp();
        assert!(render_colorbar(&ramp, 0.0, 256, 24).is_err());
    }

    #[test]
    fn test_tick_row_has_marks() {
        let ramp = Colormap::Turbo.ramp();
        let bar = render_colorbar(&ramp, 20.0, 256, 24).unwrap();
        let tick_pixels = (0..256u32).filter(|x| *bar.get_pixel(*x, 23) == TICK).count();
        assert!(tick_pixels >= 3, "expected ticks at min, mid, and max");
    }
}
