//! Geographic primitives for the viewer.

use serde::{Deserialize, Serialize};

use crate::error::{ViewerError, ViewerResult};

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Position linearly interpolated towards `other` at ratio `t` in [0, 1].
    pub fn lerp(&self, other: LatLng, t: f64) -> LatLng {
        LatLng {
            lat: self.lat + (other.lat - self.lat) * t,
            lon: self.lon + (other.lon - self.lon) * t,
        }
    }
}

/// An axis-aligned lat/lon rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Approximate bounds of Long Island Sound.
    pub fn long_island_sound() -> Self {
        Self::new(LatLng::new(39.0, -76.0), LatLng::new(43.0, -70.0))
    }

    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.south_west.lat
            && p.lat <= self.north_east.lat
            && p.lon >= self.south_west.lon
            && p.lon <= self.north_east.lon
    }

    pub fn width(&self) -> f64 {
        self.north_east.lon - self.south_west.lon
    }

    pub fn height(&self) -> f64 {
        self.north_east.lat - self.south_west.lat
    }
}

/// A user-drawn polygon as an ordered vertex ring.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<LatLng>,
}

impl Polygon {
    /// Build a polygon from its vertex ring.
    ///
    /// A ring with fewer than 3 distinct vertices is malformed geometry.
    pub fn new(vertices: Vec<LatLng>) -> ViewerResult<Self> {
        let mut distinct: Vec<LatLng> = Vec::new();
        for v in &vertices {
            if !distinct.contains(v) {
                distinct.push(*v);
            }
        }
        if distinct.len() < 3 {
            return Err(ViewerError::Domain(
                "Polygon needs at least 3 distinct vertices".to_string(),
            ));
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[LatLng] {
        &self.vertices
    }

    /// GeoJSON Polygon geometry, ring closed and coordinates in [lon, lat]
    /// order as the backend expects.
    pub fn to_geojson(&self) -> serde_json::Value {
        let mut ring: Vec<[f64; 2]> = self.vertices.iter().map(|v| [v.lon, v.lat]).collect();
        if ring.first() != ring.last() {
            if let Some(first) = ring.first().copied() {
                ring.push(first);
            }
        }
        serde_json::json!({
            "type": "Polygon",
            "coordinates": [ring],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_contains() {
        let bounds = LatLngBounds::long_island_sound();
        assert!(bounds.contains(LatLng::new(41.0, -72.9)));
        assert!(!bounds.contains(LatLng::new(25.0, -80.0)));
    }

    #[test]
    fn test_latlng_lerp() {
        let a = LatLng::new(40.0, -74.0);
        let b = LatLng::new(42.0, -70.0);
        let mid = a.lerp(b, 0.5);
        assert_eq!(mid, LatLng::new(41.0, -72.0));
    }

    #[test]
    fn test_polygon_rejects_degenerate_ring() {
        let p = LatLng::new(41.0, -72.0);
        assert!(Polygon::new(vec![p, p, p]).is_err());
        assert!(Polygon::new(vec![p, LatLng::new(41.1, -72.0)]).is_err());
    }

    #[test]
    fn test_polygon_geojson_closes_ring() {
        let poly = Polygon::new(vec![
            LatLng::new(41.0, -73.0),
            LatLng::new(41.2, -73.0),
            LatLng::new(41.2, -72.8),
        ])
        .unwrap();

        let geojson = poly.to_geojson();
        assert_eq!(geojson["type"], "Polygon");
        let ring = geojson["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.first(), ring.last());
        // Coordinates are [lon, lat].
        assert_eq!(ring[0][0], -73.0);
        assert_eq!(ring[0][1], 41.0);
    }
}
