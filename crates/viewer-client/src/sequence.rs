//! Request generations for discarding stale responses.
//!
//! Starting a new tool or query while a request is in flight must not let the
//! old response land later and overwrite the display. Each issued request
//! carries the generation current at issue time; a response is applied only
//! if its generation is still current.

use std::sync::atomic::{AtomicU64, Ordering};

/// The generation a request was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// Monotonic request-generation counter.
#[derive(Debug, Default)]
pub struct RequestSeq {
    current: AtomicU64,
}

impl RequestSeq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, invalidating every in-flight request.
    pub fn begin(&self) -> Generation {
        Generation(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// True when a response from this generation is still the latest.
    pub fn is_current(&self, gen: Generation) -> bool {
        self.current.load(Ordering::SeqCst) == gen.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_generation_is_current() {
        let seq = RequestSeq::new();
        let gen = seq.begin();
        assert!(seq.is_current(gen));
    }

    #[test]
    fn test_superseded_generation_is_stale() {
        let seq = RequestSeq::new();
        let first = seq.begin();
        let second = seq.begin();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }
}
