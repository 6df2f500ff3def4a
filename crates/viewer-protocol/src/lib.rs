//! Typed schemas for the LIS raster-analysis backend API.
//!
//! The backend speaks loose JSON; every payload is deserialized into one of
//! these types and passed through `validate()` at the boundary, so shape
//! mismatches surface as a distinguishable invalid-response error instead of
//! propagating duck-typed values into the viewer.

pub mod responses;

pub use responses::{
    AvailableDatesResponse, ErrorBody, InSituPoint, InSituResponse, PointValueResponse,
    PolygonStatsResponse, TimeseriesResult, TransectResponse,
};
