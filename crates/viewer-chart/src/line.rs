//! Line chart rendering.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

use viewer_common::{ViewerError, ViewerResult};

use crate::series::Series;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const AXIS: Rgba<u8> = Rgba([60, 60, 60, 255]);
const GRID: Rgba<u8> = Rgba([225, 225, 225, 255]);
const LINE: Rgba<u8> = Rgba([102, 170, 255, 255]);
const POINT: Rgba<u8> = Rgba([51, 119, 204, 255]);

const MARGIN_LEFT: u32 = 48;
const MARGIN_RIGHT: u32 = 16;
const MARGIN_TOP: u32 = 16;
const MARGIN_BOTTOM: u32 = 32;

const GRID_DIVISIONS: u32 = 5;

/// What the chart depicts; controls point sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Distance on the x axis, densely sampled.
    Transect,
    /// Dates on the x axis, one point per day.
    Timeseries,
}

impl ChartKind {
    fn point_radius(self) -> i32 {
        match self {
            ChartKind::Transect => 0,
            ChartKind::Timeseries => 3,
        }
    }
}

/// Renders one series to a fixed-size line chart.
///
/// The y range is [0, max * 1.1] so the peak never touches the frame.
/// Non-finite values leave a gap: no segment is drawn into or out of them.
#[derive(Debug, Clone)]
pub struct LineChart {
    width: u32,
    height: u32,
    kind: ChartKind,
}

impl LineChart {
    pub fn new(width: u32, height: u32, kind: ChartKind) -> Self {
        Self {
            width,
            height,
            kind,
        }
    }

    pub fn render(&self, series: &Series) -> ViewerResult<RgbaImage> {
        if series.is_empty() {
            return Err(ViewerError::Domain("Cannot chart an empty series".to_string()));
        }
        let max = series
            .max_value()
            .ok_or_else(|| ViewerError::Domain("Series has no finite values".to_string()))?;
        let y_max = if max > 0.0 { max * 1.1 } else { 1.0 };

        let mut image = RgbaImage::from_pixel(self.width, self.height, BACKGROUND);

        let plot_left = MARGIN_LEFT as f32;
        let plot_right = (self.width - MARGIN_RIGHT) as f32;
        let plot_top = MARGIN_TOP as f32;
        let plot_bottom = (self.height - MARGIN_BOTTOM) as f32;

        for i in 1..=GRID_DIVISIONS {
            let y = plot_bottom - (plot_bottom - plot_top) * i as f32 / GRID_DIVISIONS as f32;
            draw_line_segment_mut(&mut image, (plot_left, y), (plot_right, y), GRID);
        }

        // Axes drawn after gridlines so they stay on top.
        draw_line_segment_mut(&mut image, (plot_left, plot_top), (plot_left, plot_bottom), AXIS);
        draw_line_segment_mut(&mut image, (plot_left, plot_bottom), (plot_right, plot_bottom), AXIS);

        let n = series.len();
        let x_for = |i: usize| -> f32 {
            if n == 1 {
                (plot_left + plot_right) / 2.0
            } else {
                plot_left + (plot_right - plot_left) * i as f32 / (n - 1) as f32
            }
        };
        let y_for = |v: f64| -> f32 {
            let t = (v / y_max).clamp(0.0, 1.0) as f32;
            plot_bottom - (plot_bottom - plot_top) * t
        };

        let mut prev: Option<(f32, f32)> = None;
        for (i, point) in series.points.iter().enumerate() {
            if !point.value.is_finite() {
                prev = None;
                continue;
            }
            let xy = (x_for(i), y_for(point.value));
            if let Some(p) = prev {
                draw_line_segment_mut(&mut image, p, xy, LINE);
            }
            let radius = self.kind.point_radius();
            if radius > 0 {
                draw_filled_circle_mut(&mut image, (xy.0 as i32, xy.1 as i32), radius, POINT);
            }
            prev = Some(xy);
        }

        Ok(image)
    }
}
