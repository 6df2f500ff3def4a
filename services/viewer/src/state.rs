//! Explicit viewer state.
//!
//! Everything the UI shows hangs off one [`ViewerState`] value: the selected
//! date, variable, colormap, and the tool controller. Mutations go through
//! methods so dependent effects (re-fetching the overlay after a date change)
//! are decided in one place.

use chrono::NaiveDate;

use viewer_common::{gcs_download_url, Colormap, LatLngBounds, RasterCatalog, Variable};

use crate::config::ViewerConfig;
use crate::tools::{ToolController, ToolRequest};

#[derive(Debug)]
pub struct ViewerState {
    date: NaiveDate,
    variable: Variable,
    colormap: Colormap,
    catalog: RasterCatalog,
    bounds: LatLngBounds,
    rewrite_gcs_urls: bool,
    pub tools: ToolController,
}

impl ViewerState {
    pub fn new(config: &ViewerConfig, date: NaiveDate) -> Self {
        Self {
            date,
            variable: config.default_variable,
            colormap: config.default_colormap,
            catalog: RasterCatalog::new(config.storage_base.clone()),
            bounds: config.bounds,
            rewrite_gcs_urls: config.rewrite_gcs_urls,
            tools: ToolController::new(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn variable(&self) -> Variable {
        self.variable
    }

    pub fn colormap(&self) -> Colormap {
        self.colormap
    }

    pub fn catalog(&self) -> &RasterCatalog {
        &self.catalog
    }

    pub fn bounds(&self) -> LatLngBounds {
        self.bounds
    }

    /// Object-store URL of the raster for the current date and variable,
    /// rewritten to the JSON-API download form when configured.
    pub fn raster_url(&self) -> String {
        let url = self.catalog.object_url(self.date, self.variable);
        if self.rewrite_gcs_urls {
            gcs_download_url(&url)
        } else {
            url
        }
    }

    /// Change the displayed date.
    ///
    /// When the in-situ overlay is visible its points are date-specific, so
    /// the change triggers a re-fetch.
    pub fn set_date(&mut self, date: NaiveDate) -> Option<ToolRequest> {
        self.date = date;
        self.overlay_refetch()
    }

    /// Change the displayed variable, with the same overlay re-fetch rule as
    /// [`Self::set_date`].
    pub fn set_variable(&mut self, variable: Variable) -> Option<ToolRequest> {
        self.variable = variable;
        self.overlay_refetch()
    }

    /// Colormap changes are purely cosmetic; nothing is re-fetched.
    pub fn set_colormap(&mut self, colormap: Colormap) {
        self.colormap = colormap;
    }

    fn overlay_refetch(&self) -> Option<ToolRequest> {
        if self.tools.annotations().overlay_visible {
            Some(ToolRequest::OverlayFetch)
        } else {
            None
        }
    }
}
