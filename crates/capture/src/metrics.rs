//! Capture metrics
//!
//! Atomic counters for the run summary, mirrored into `metrics` counters for
//! any recorder the host process installs.

use std::sync::atomic::{AtomicU64, Ordering};

/// Ingestion counters shared across callback threads.
#[derive(Debug, Default)]
pub struct CaptureMetrics {
    /// Synchronized frame sets observed
    pub frame_sets: AtomicU64,

    /// Frame sets skipped by the warm-up gate
    pub warmup_skipped: AtomicU64,

    /// Point samples appended to the buffer
    pub points_appended: AtomicU64,

    /// Frame sets abandoned because the point buffer was full
    pub capacity_rejected: AtomicU64,

    /// Motion samples appended
    pub motion_samples: AtomicU64,

    /// Motion frames silently ignored (unaccepted stream/format)
    pub ignored_frames: AtomicU64,
}

impl CaptureMetrics {
    /// Create a fresh counter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observed frame set
    pub fn record_frame_set(&self) {
        self.frame_sets.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("capture_frame_sets_total").increment(1);
    }

    /// Record one warm-up skip
    pub fn record_warmup_skip(&self) {
        self.warmup_skipped.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("capture_warmup_skipped_total").increment(1);
    }

    /// Record appended point samples
    pub fn record_points(&self, count: usize) {
        self.points_appended.fetch_add(count as u64, Ordering::Relaxed);
        metrics::counter!("capture_points_appended_total").increment(count as u64);
    }

    /// Record one frame set dropped at capacity
    pub fn record_capacity_reject(&self) {
        self.capacity_rejected.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("capture_capacity_rejected_total").increment(1);
    }

    /// Record one buffered motion sample
    pub fn record_motion_sample(&self) {
        self.motion_samples.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("capture_motion_samples_total").increment(1);
    }

    /// Record one silently ignored motion frame
    pub fn record_ignored(&self) {
        self.ignored_frames.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("capture_ignored_frames_total").increment(1);
    }

    /// Get snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            frame_sets: self.frame_sets.load(Ordering::Relaxed),
            warmup_skipped: self.warmup_skipped.load(Ordering::Relaxed),
            points_appended: self.points_appended.load(Ordering::Relaxed),
            capacity_rejected: self.capacity_rejected.load(Ordering::Relaxed),
            motion_samples: self.motion_samples.load(Ordering::Relaxed),
            ignored_frames: self.ignored_frames.load(Ordering::Relaxed),
        }
    }
}

/// Metrics snapshot
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    /// Synchronized frame sets observed
    pub frame_sets: u64,

    /// Frame sets skipped by the warm-up gate
    pub warmup_skipped: u64,

    /// Point samples appended
    pub points_appended: u64,

    /// Frame sets abandoned at capacity
    pub capacity_rejected: u64,

    /// Motion samples appended
    pub motion_samples: u64,

    /// Motion frames silently ignored
    pub ignored_frames: u64,
}
