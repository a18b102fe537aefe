//! Warm-up gate
//!
//! The sensor's auto-exposure/auto-gain needs a startup period; frame sets
//! captured before stabilization have unreliable color and intensity data and
//! are skipped outright.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Counts observed frame sets and suppresses the first `threshold` of them.
#[derive(Debug)]
pub struct WarmupGate {
    seen: Mutex<u64>,
    threshold: u64,
}

impl WarmupGate {
    /// Default number of suppressed frame sets.
    pub const DEFAULT_THRESHOLD: u64 = 30;

    /// Create a gate suppressing the first `threshold` frame sets.
    pub fn new(threshold: u64) -> Self {
        Self {
            seen: Mutex::new(0),
            threshold,
        }
    }

    /// Record one observed frame set; true while the gate is still warming.
    ///
    /// Compare and increment run under one lock so concurrent delivery cannot
    /// admit more than the intended number of warm-up frames.
    pub fn observe_frame_set(&self) -> bool {
        let mut seen = lock(&self.seen);
        let warming = *seen < self.threshold;
        *seen += 1;
        warming
    }

    /// Number of frame sets observed so far.
    pub fn observed(&self) -> u64 {
        *lock(&self.seen)
    }
}

impl Default for WarmupGate {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

fn lock(mutex: &Mutex<u64>) -> MutexGuard<'_, u64> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
