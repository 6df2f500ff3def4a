//! Color ramps for mapping raster values to display colors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ViewerError, ViewerResult};

/// An RGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a "#rrggbb" hex string.
    pub fn from_hex(s: &str) -> ViewerResult<Self> {
        let hex = s.trim_start_matches('#');
        // Byte-wise so a multi-byte character is a parse error, not a
        // char-boundary panic when slicing.
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ViewerError::Domain(format!("Invalid hex color: {}", s)));
        }
        let parse = |range: &str| {
            u8::from_str_radix(range, 16)
                .map_err(|_| ViewerError::Domain(format!("Invalid hex color: {}", s)))
        };
        Ok(Self {
            r: parse(&hex[0..2])?,
            g: parse(&hex[2..4])?,
            b: parse(&hex[4..6])?,
        })
    }

    /// Format as "#rrggbb".
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear interpolation towards `other` at ratio `t` in [0, 1].
    pub fn lerp(&self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 { (a as f64 + (b as f64 - a as f64) * t).round() as u8 };
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// An ordered sequence of anchor colors mapped onto the interval [0, max].
#[derive(Debug, Clone)]
pub struct ColorRamp {
    anchors: Vec<Rgb>,
}

impl ColorRamp {
    /// Build a ramp from anchor colors. Needs at least two anchors.
    pub fn new(anchors: Vec<Rgb>) -> ViewerResult<Self> {
        if anchors.len() < 2 {
            return Err(ViewerError::Domain(
                "Color ramp needs at least 2 anchors".to_string(),
            ));
        }
        Ok(Self { anchors })
    }

    fn from_hex_anchors(hex: &[&str]) -> Self {
        // Built-in palettes are compile-time constants; a bad anchor is a bug.
        let anchors = hex
            .iter()
            .map(|h| Rgb::from_hex(h))
            .collect::<ViewerResult<Vec<_>>>()
            .unwrap();
        Self { anchors }
    }

    pub fn anchors(&self) -> &[Rgb] {
        &self.anchors
    }

    /// Map a value in [0, max] to an interpolated color along the ramp.
    ///
    /// Out-of-range values saturate to the endpoint colors. A non-positive or
    /// non-finite `max` is a domain error rather than a NaN-colored pixel.
    pub fn color_for(&self, value: f64, max: f64) -> ViewerResult<Rgb> {
        if !max.is_finite() || max <= 0.0 {
            return Err(ViewerError::Domain(format!(
                "Color ramp max must be positive, got {}",
                max
            )));
        }
        let t = value.clamp(0.0, max) / max;
        let n = self.anchors.len();
        let pos = t * (n - 1) as f64;
        let idx = pos.floor() as usize;
        let ratio = pos - idx as f64;
        let low = self.anchors[idx];
        let high = self.anchors[(idx + 1).min(n - 1)];
        Ok(low.lerp(high, ratio))
    }

    /// Enumerate evenly spaced colorbar stops over [0, max].
    ///
    /// Returns `steps + 1` (position, color) pairs with positions as
    /// percentages in [0, 100].
    pub fn gradient_stops(&self, max: f64, steps: usize) -> ViewerResult<Vec<(f64, Rgb)>> {
        if steps == 0 {
            return Err(ViewerError::Domain(
                "Colorbar needs at least one step".to_string(),
            ));
        }
        let mut stops = Vec::with_capacity(steps + 1);
        for i in 0..=steps {
            let frac = i as f64 / steps as f64;
            let color = self.color_for(frac * max, max)?;
            stops.push((frac * 100.0, color));
        }
        Ok(stops)
    }
}

/// Tick values for a colorbar legend: min, mid, max.
pub fn colorbar_ticks(max: f64) -> [f64; 3] {
    [0.0, max / 2.0, max]
}

/// Named colormap selectable from the viewer controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    #[default]
    Turbo,
    Viridis,
    Magma,
}

impl Colormap {
    /// The anchor ramp for this colormap.
    pub fn ramp(&self) -> ColorRamp {
        match self {
            Colormap::Turbo => ColorRamp::from_hex_anchors(&[
                "#30123b", "#4145ab", "#4675ed", "#39a2fc", "#1bcfd4", "#24eca6", "#61fc6c",
                "#a4fc3b", "#d1e834", "#f3c63a", "#fe9b2d", "#f36315", "#d93806", "#a11907",
                "#7a0403",
            ]),
            Colormap::Viridis => ColorRamp::from_hex_anchors(&[
                "#440154", "#482777", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779",
                "#6ece58", "#b5de2b", "#fde725",
            ]),
            Colormap::Magma => ColorRamp::from_hex_anchors(&[
                "#000004", "#1b0c41", "#4a0c6b", "#781c6d", "#a52c60", "#cf4446", "#ed6925",
                "#fb9a06", "#f7d13d", "#fcfdbf",
            ]),
        }
    }

    /// Shorthand for `ramp().color_for(value, max)`.
    pub fn color_for(&self, value: f64, max: f64) -> ViewerResult<Rgb> {
        self.ramp().color_for(value, max)
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Colormap::Turbo => "turbo",
            Colormap::Viridis => "viridis",
            Colormap::Magma => "magma",
        };
        f.write_str(name)
    }
}

impl FromStr for Colormap {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "turbo" => Ok(Colormap::Turbo),
            "viridis" => Ok(Colormap::Viridis),
            "magma" => Ok(Colormap::Magma),
            other => Err(ViewerError::Domain(format!("Unknown colormap: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        let c = Rgb::from_hex("#30123b").unwrap();
        assert_eq!(c, Rgb::new(0x30, 0x12, 0x3b));
        assert_eq!(c.to_hex(), "#30123b");
    }

    #[test]
    fn test_hex_invalid() {
        assert!(Rgb::from_hex("#fff").is_err());
        assert!(Rgb::from_hex("#gggggg").is_err());
    }

    #[test]
    fn test_hex_multibyte_is_an_error_not_a_panic() {
        // Six bytes but not six ASCII digits; slicing at byte offsets would
        // split the two-byte character.
        assert!(Rgb::from_hex("#aébcd").is_err());
        assert!(Rgb::from_hex("émagenta").is_err());
    }

    #[test]
    fn test_color_for_saturates_at_endpoints() {
        let ramp = Colormap::Turbo.ramp();
        let first = *ramp.anchors().first().unwrap();
        let last = *ramp.anchors().last().unwrap();

        assert_eq!(ramp.color_for(0.0, 12.0).unwrap(), first);
        assert_eq!(ramp.color_for(-5.0, 12.0).unwrap(), first);
        assert_eq!(ramp.color_for(12.0, 12.0).unwrap(), last);
        assert_eq!(ramp.color_for(100.0, 12.0).unwrap(), last);
    }

    #[test]
    fn test_color_for_hits_interior_anchors() {
        // With N anchors, value = max * k/(N-1) lands exactly on anchor k.
        let ramp = Colormap::Viridis.ramp();
        let n = ramp.anchors().len();
        for (k, anchor) in ramp.anchors().iter().enumerate() {
            let v = 20.0 * k as f64 / (n - 1) as f64;
            assert_eq!(ramp.color_for(v, 20.0).unwrap(), *anchor);
        }
    }

    #[test]
    fn test_color_for_midpoint_interpolates() {
        let ramp = ColorRamp::new(vec![Rgb::new(0, 0, 0), Rgb::new(200, 100, 50)]).unwrap();
        let mid = ramp.color_for(5.0, 10.0).unwrap();
        assert_eq!(mid, Rgb::new(100, 50, 25));
    }

    #[test]
    fn test_green_channel_monotone_along_viridis() {
        // Viridis runs dark purple to bright yellow; its green channel is
        // non-decreasing for increasing values.
        let ramp = Colormap::Viridis.ramp();
        let mut last_g = 0u8;
        for i in 0..=40 {
            let v = 20.0 * i as f64 / 40.0;
            let c = ramp.color_for(v, 20.0).unwrap();
            assert!(c.g >= last_g, "green decreased at v={}", v);
            last_g = c.g;
        }
    }

    #[test]
    fn test_color_for_bad_max() {
        let ramp = Colormap::Magma.ramp();
        assert!(ramp.color_for(1.0, 0.0).is_err());
        assert!(ramp.color_for(1.0, -3.0).is_err());
        assert!(ramp.color_for(1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_ramp_needs_two_anchors() {
        assert!(ColorRamp::new(vec![Rgb::new(0, 0, 0)]).is_err());
    }

    #[test]
    fn test_gradient_stops() {
        let ramp = Colormap::Turbo.ramp();
        let stops = ramp.gradient_stops(12.0, 20).unwrap();
        assert_eq!(stops.len(), 21);
        assert_eq!(stops[0].0, 0.0);
        assert_eq!(stops[20].0, 100.0);
        assert_eq!(stops[0].1, *ramp.anchors().first().unwrap());
        assert_eq!(stops[20].1, *ramp.anchors().last().unwrap());
    }

    #[test]
    fn test_colorbar_ticks() {
        assert_eq!(colorbar_ticks(20.0), [0.0, 10.0, 20.0]);
    }

    #[test]
    fn test_colormap_parse() {
        assert_eq!("turbo".parse::<Colormap>().unwrap(), Colormap::Turbo);
        assert_eq!("VIRIDIS".parse::<Colormap>().unwrap(), Colormap::Viridis);
        assert!("jet".parse::<Colormap>().is_err());
    }
}
