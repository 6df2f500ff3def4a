//! Interactive tool selection and click handling.
//!
//! One tool is active at a time. All activation goes through
//! [`ToolController::select`], which tears down the previous tool's pending
//! state and annotations before arming the new one, so no tool can leave a
//! handler or half-finished interaction behind.

use viewer_common::{LatLng, Polygon, ViewerResult};

/// The interactive tool currently armed on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTool {
    /// No tool armed; clicks are ignored.
    #[default]
    None,
    /// Click a point to read the raster value there.
    PointQuery,
    /// Click two points to sample along the line between them.
    Transect,
    /// Click a point to extract a value for every date in a range.
    Timeseries,
    /// Show in-situ observations on top of the raster.
    InSituOverlay,
    /// Draw a polygon to compute area statistics.
    PolygonStats,
}

impl ActiveTool {
    /// Cursor shown while this tool is armed.
    pub fn cursor(&self) -> CursorMode {
        match self {
            ActiveTool::None | ActiveTool::InSituOverlay => CursorMode::Default,
            _ => CursorMode::Crosshair,
        }
    }
}

/// Map cursor appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMode {
    Default,
    Crosshair,
}

/// A backend request produced by a tool interaction.
///
/// The controller only decides *what* to request; issuing the request and
/// applying the response belong to the session layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolRequest {
    PointValue { point: LatLng },
    Transect { start: LatLng, end: LatLng },
    Timeseries { point: LatLng },
    OverlayFetch,
    PolygonStats { polygon: Polygon },
}

/// Map annotations owned by the active tool.
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    pub markers: Vec<LatLng>,
    pub lines: Vec<(LatLng, LatLng)>,
    pub polygons: Vec<Polygon>,
    pub overlay_visible: bool,
}

impl Annotations {
    pub fn clear(&mut self) {
        self.markers.clear();
        self.lines.clear();
        self.polygons.clear();
        self.overlay_visible = false;
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
            && self.lines.is_empty()
            && self.polygons.is_empty()
            && !self.overlay_visible
    }
}

/// Tool state machine.
#[derive(Debug, Default)]
pub struct ToolController {
    active: ActiveTool,
    /// First transect endpoint, waiting for the second click.
    transect_start: Option<LatLng>,
    /// Vertices of the polygon being drawn.
    polygon_draft: Vec<LatLng>,
    annotations: Annotations,
}

impl ToolController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> ActiveTool {
        self.active
    }

    pub fn cursor(&self) -> CursorMode {
        self.active.cursor()
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    /// Activate a tool, tearing down whatever the previous tool left behind.
    ///
    /// Selecting the already-active tool re-runs the same teardown, so a
    /// double activation cannot accumulate pending clicks or annotations.
    /// Arming the overlay tool immediately requests the overlay data.
    pub fn select(&mut self, tool: ActiveTool) -> Option<ToolRequest> {
        self.teardown();
        self.active = tool;
        tracing::debug!(tool = ?tool, "Tool selected");

        match tool {
            ActiveTool::InSituOverlay => {
                self.annotations.overlay_visible = true;
                Some(ToolRequest::OverlayFetch)
            }
            _ => None,
        }
    }

    fn teardown(&mut self) {
        self.transect_start = None;
        self.polygon_draft.clear();
        self.annotations.clear();
    }

    /// Disarm the active tool and clear everything it drew.
    pub fn clear_all(&mut self) {
        self.teardown();
        self.active = ActiveTool::None;
    }

    /// Handle a map click, returning the request it completes, if any.
    pub fn handle_click(&mut self, point: LatLng) -> Option<ToolRequest> {
        match self.active {
            ActiveTool::None | ActiveTool::InSituOverlay => None,
            ActiveTool::PointQuery => {
                self.annotations.markers.push(point);
                Some(ToolRequest::PointValue { point })
            }
            ActiveTool::Timeseries => {
                // A new click replaces the previous extraction point.
                self.annotations.markers.clear();
                self.annotations.markers.push(point);
                Some(ToolRequest::Timeseries { point })
            }
            ActiveTool::Transect => match self.transect_start.take() {
                None => {
                    self.transect_start = Some(point);
                    self.annotations.markers.push(point);
                    None
                }
                Some(start) => {
                    self.annotations.markers.push(point);
                    self.annotations.lines.push((start, point));
                    Some(ToolRequest::Transect { start, end: point })
                }
            },
            ActiveTool::PolygonStats => {
                self.polygon_draft.push(point);
                None
            }
        }
    }

    /// Close the polygon being drawn and request statistics for it.
    ///
    /// Fails when fewer than three distinct vertices were clicked; the draft
    /// is kept so the user can keep adding vertices.
    pub fn complete_polygon(&mut self) -> ViewerResult<Option<ToolRequest>> {
        if self.active != ActiveTool::PolygonStats {
            return Ok(None);
        }
        let polygon = Polygon::new(self.polygon_draft.clone())?;
        self.polygon_draft.clear();
        self.annotations.polygons.push(polygon.clone());
        Ok(Some(ToolRequest::PolygonStats { polygon }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lat: f64, lon: f64) -> LatLng {
        LatLng::new(lat, lon)
    }

    #[test]
    fn test_no_tool_ignores_clicks() {
        let mut tools = ToolController::new();
        assert_eq!(tools.handle_click(p(41.0, -73.0)), None);
        assert!(tools.annotations().is_empty());
    }

    #[test]
    fn test_point_query_request_per_click() {
        let mut tools = ToolController::new();
        tools.select(ActiveTool::PointQuery);
        let req = tools.handle_click(p(41.0, -73.0));
        assert_eq!(
            req,
            Some(ToolRequest::PointValue {
                point: p(41.0, -73.0)
            })
        );
        assert_eq!(tools.annotations().markers.len(), 1);
    }

    #[test]
    fn test_transect_two_clicks_one_request() {
        let mut tools = ToolController::new();
        tools.select(ActiveTool::Transect);

        assert_eq!(tools.handle_click(p(41.0, -73.5)), None);
        let req = tools.handle_click(p(41.2, -72.8));
        assert_eq!(
            req,
            Some(ToolRequest::Transect {
                start: p(41.0, -73.5),
                end: p(41.2, -72.8),
            })
        );
        assert_eq!(tools.annotations().lines.len(), 1);

        // A third click starts a fresh transect.
        assert_eq!(tools.handle_click(p(40.9, -73.0)), None);
    }

    #[test]
    fn test_reselecting_transect_does_not_duplicate_requests() {
        let mut tools = ToolController::new();
        tools.select(ActiveTool::Transect);
        tools.select(ActiveTool::Transect);

        let mut requests = Vec::new();
        if let Some(r) = tools.handle_click(p(41.0, -73.5)) {
            requests.push(r);
        }
        if let Some(r) = tools.handle_click(p(41.2, -72.8)) {
            requests.push(r);
        }
        assert_eq!(requests.len(), 1, "two clicks must produce one request");
    }

    #[test]
    fn test_switching_tools_clears_annotations_and_pending() {
        let mut tools = ToolController::new();
        tools.select(ActiveTool::Transect);
        tools.handle_click(p(41.0, -73.5));

        tools.select(ActiveTool::PointQuery);
        assert!(tools.annotations().is_empty());

        // The dangling transect start must not complete across tools.
        tools.select(ActiveTool::Transect);
        assert_eq!(tools.handle_click(p(41.2, -72.8)), None);
    }

    #[test]
    fn test_overlay_selection_requests_fetch() {
        let mut tools = ToolController::new();
        assert_eq!(
            tools.select(ActiveTool::InSituOverlay),
            Some(ToolRequest::OverlayFetch)
        );
        assert!(tools.annotations().overlay_visible);
        assert_eq!(tools.cursor(), CursorMode::Default);
    }

    #[test]
    fn test_polygon_needs_three_distinct_vertices() {
        let mut tools = ToolController::new();
        tools.select(ActiveTool::PolygonStats);
        tools.handle_click(p(41.0, -73.0));
        tools.handle_click(p(41.1, -73.0));
        assert!(tools.complete_polygon().is_err());

        tools.handle_click(p(41.1, -72.9));
        let req = tools.complete_polygon().unwrap();
        assert!(matches!(req, Some(ToolRequest::PolygonStats { .. })));
        assert_eq!(tools.annotations().polygons.len(), 1);
    }

    #[test]
    fn test_clear_all_disarms() {
        let mut tools = ToolController::new();
        tools.select(ActiveTool::PointQuery);
        tools.handle_click(p(41.0, -73.0));
        tools.clear_all();
        assert_eq!(tools.active(), ActiveTool::None);
        assert!(tools.annotations().is_empty());
    }
}
