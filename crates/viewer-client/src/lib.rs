//! Client for the LIS raster-analysis backend.
//!
//! One operation per endpoint, plus the client-side timeseries loop. Every
//! failure (network, non-2xx, malformed JSON) is converted into a typed
//! `ViewerError` at the call site; nothing is retried.

pub mod client;
pub mod sequence;
pub mod timeseries;

pub use client::ApiClient;
pub use sequence::{Generation, RequestSeq};
pub use timeseries::TimeseriesProgress;
