//! Long Island Sound raster viewer.
//!
//! Front-end logic for browsing the daily OLCI GeoTIFF archive: viewer
//! state, interactive tools, calendar, backend session, and CSV export.

pub mod calendar;
pub mod config;
pub mod export;
pub mod session;
pub mod state;
pub mod tools;

pub use calendar::MonthGrid;
pub use config::ViewerConfig;
pub use session::{Outcome, Session};
pub use state::ViewerState;
pub use tools::{ActiveTool, ToolController, ToolRequest};
