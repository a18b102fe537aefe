//! Capture session - the thread-safe ingestion entry point
//!
//! One `CaptureSession` spans one capture window. The driver invokes the
//! session's callback on its own threads; the session classifies, gates,
//! samples, and buffers. Fatal conditions cannot unwind through the driver's
//! callback boundary, so the first one is parked in a one-shot fault slot and
//! the session stops accepting frames; the orchestrator polls for the abort
//! and propagates the stored error.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use contracts::{CaptureError, DriverFrame, FrameCallback, ProjectionEngine};
use tracing::{debug, error, trace, warn};

use crate::buffer::{AppendOutcome, MotionBuffer, PointBuffer};
use crate::classifier::{self, Classified};
use crate::metrics::CaptureMetrics;
use crate::sampler;
use crate::warmup::WarmupGate;

/// What one ingest call did with its frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Frame set skipped by the warm-up gate
    WarmingUp,
    /// Frame set sampled; carries the number of buffered points
    Points(usize),
    /// Frame set abandoned because the point buffer is full
    CapacityExhausted,
    /// Motion sample buffered
    Motion,
    /// Motion frame silently ignored
    Ignored,
}

/// One capture window's shared state.
pub struct CaptureSession {
    points: Arc<PointBuffer>,
    motion: Arc<MotionBuffer>,
    warmup: WarmupGate,
    projector: Arc<dyn ProjectionEngine>,
    metrics: Arc<CaptureMetrics>,
    fault: Mutex<Option<CaptureError>>,
    aborted: AtomicBool,
}

impl CaptureSession {
    /// Create a session over the given buffers and projection engine.
    pub fn new(
        points: Arc<PointBuffer>,
        motion: Arc<MotionBuffer>,
        warmup: WarmupGate,
        projector: Arc<dyn ProjectionEngine>,
    ) -> Self {
        Self {
            points,
            motion,
            warmup,
            projector,
            metrics: Arc::new(CaptureMetrics::new()),
            fault: Mutex::new(None),
            aborted: AtomicBool::new(false),
        }
    }

    /// Ingest one driver frame.
    ///
    /// Thread-safe; may be called concurrently. Recoverable conditions
    /// (capacity, unaccepted motion) are handled here and reported through
    /// the outcome; fatal conditions come back as `Err`.
    pub fn ingest(&self, frame: &DriverFrame) -> Result<IngestOutcome, CaptureError> {
        match classifier::classify(frame)? {
            Classified::FrameSet(set) => {
                self.metrics.record_frame_set();

                if self.warmup.observe_frame_set() {
                    self.metrics.record_warmup_skip();
                    trace!(frame_number = set.frame_number, "frame set inside warm-up window");
                    return Ok(IngestOutcome::WarmingUp);
                }

                let projection = self.projector.project(set.depth, set.color)?;
                if projection.is_empty() {
                    return Err(CaptureError::EmptyProjection {
                        timestamp: set.timestamp,
                    });
                }

                let declared = projection.len();
                let batch = sampler::sample_points(&set, &projection)?;

                match self.points.try_append(declared, batch) {
                    AppendOutcome::Appended(stored) => {
                        self.metrics.record_points(stored);
                        trace!(
                            frame_number = set.frame_number,
                            stored,
                            declared,
                            "frame set buffered"
                        );
                        Ok(IngestOutcome::Points(stored))
                    }
                    AppendOutcome::Full => {
                        self.metrics.record_capacity_reject();
                        warn!(
                            frame_number = set.frame_number,
                            "point buffer filled, unable to collect more data"
                        );
                        Ok(IngestOutcome::CapacityExhausted)
                    }
                }
            }

            Classified::Motion(sample) => {
                self.motion.append(sample);
                self.metrics.record_motion_sample();
                Ok(IngestOutcome::Motion)
            }

            Classified::Ignored => {
                self.metrics.record_ignored();
                Ok(IngestOutcome::Ignored)
            }
        }
    }

    /// Build the callback handed to the driver.
    ///
    /// The first fatal error aborts the session: it is stored for the
    /// orchestrator and every later invocation returns without touching the
    /// buffers.
    pub fn callback(self: &Arc<Self>) -> FrameCallback {
        let session = Arc::clone(self);
        Arc::new(move |frame| {
            if session.aborted.load(Ordering::Acquire) {
                return;
            }
            if let Err(e) = session.ingest(&frame) {
                error!(error = %e, "fatal error while ingesting frame");
                let mut slot = lock(&session.fault);
                if slot.is_none() {
                    *slot = Some(e);
                }
                session.aborted.store(true, Ordering::Release);
            }
        })
    }

    /// True once a fatal error has stopped ingestion.
    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Acquire)
    }

    /// Take the stored fatal error, if any.
    pub fn take_fault(&self) -> Option<CaptureError> {
        lock(&self.fault).take()
    }

    /// Shared point buffer.
    pub fn point_buffer(&self) -> &Arc<PointBuffer> {
        &self.points
    }

    /// Shared motion buffer.
    pub fn motion_buffer(&self) -> &Arc<MotionBuffer> {
        &self.motion
    }

    /// Shared counters.
    pub fn metrics(&self) -> &Arc<CaptureMetrics> {
        &self.metrics
    }

    /// Log a one-line ingest status, used by the periodic fill report.
    pub fn log_fill(&self) {
        let snapshot = self.metrics.snapshot();
        debug!(
            fill_percent = format!("{:.1}", self.points.fill_ratio() * 100.0),
            points = snapshot.points_appended,
            motion = snapshot.motion_samples,
            "buffer status"
        );
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
